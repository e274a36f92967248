//! Historical-series export.
//!
//! The data-observation menu can save any of the three recorded series as
//! a two-column CSV, timestamped so repeated saves never clobber each
//! other. The series are read straight out of the run's [`Dataset`];
//! nothing here mutates it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;

use crate::history::Dataset;

/// Which recorded series to observe or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Temperature,
    Gradient,
    Illuminance,
}

impl Series {
    /// File-name stem, matching the historical export naming.
    pub fn stem(self) -> &'static str {
        match self {
            Self::Temperature => "TemperatureData",
            Self::Gradient => "ChangeInTemperatureData",
            Self::Illuminance => "LightData",
        }
    }

    /// CSV column header for the value column.
    pub fn value_header(self) -> &'static str {
        match self {
            Self::Temperature => "temperature_c",
            Self::Gradient => "gradient_c_per_s",
            Self::Illuminance => "illuminance_lux",
        }
    }

    /// Samples required before the series is worth looking at.
    pub fn min_samples(self) -> usize {
        match self {
            // The gradient starts one sample behind the others.
            Self::Gradient => 10,
            Self::Temperature | Self::Illuminance => 20,
        }
    }
}

/// `(time, value)` pairs for a series, oldest first.
///
/// The time axis is seeded with an extra leading zero and the gradient
/// lags the temperature by one tick, so each series is paired with the
/// tail of the time axis that actually corresponds to it.
pub fn series_points(dataset: &Dataset, series: Series) -> Vec<(f64, f64)> {
    let times = dataset.time.to_vec();
    let values = match series {
        Series::Temperature => dataset.temperature.to_vec(),
        Series::Gradient => dataset.gradient.to_vec(),
        Series::Illuminance => dataset.illuminance.to_vec(),
    };
    let skip = times.len().saturating_sub(values.len());
    times.into_iter().skip(skip).zip(values).collect()
}

/// Write a series to `dir` as CSV. Returns the created path.
pub fn save_csv(dataset: &Dataset, series: Series, dir: &Path) -> io::Result<PathBuf> {
    let stamp = Local::now().format("%d%m%Y%H%M%S");
    let path = dir.join(format!("{stamp} {}.csv", series.stem()));

    let mut file = fs::File::create(&path)?;
    writeln!(file, "time_s,{}", series.value_header())?;
    for (time, value) in series_points(dataset, series) {
        writeln!(file, "{time},{value}")?;
    }
    file.flush()?;

    info!("saved {:?} series to {}", series, path.display());
    Ok(path)
}
