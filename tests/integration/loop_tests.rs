//! End-to-end polling-loop runs against the recording mock board.

use thermovent::cancel::CancelToken;
use thermovent::config::{Settings, Timing};
use thermovent::error::BoardError;
use thermovent::pins::PinMap;
use thermovent::poll::PollingLoop;
use thermovent::render::LedPattern;

use crate::mock_board::{Call, MockBoard};

/// Run the loop until `ticks` complete (two analog reads per tick).
fn run_ticks(board: &mut MockBoard, settings: &Settings, ticks: usize) -> PollingLoop {
    let pins = PinMap::default();
    let mut poll = PollingLoop::new(&pins, Timing::instant());
    let cancel = CancelToken::new();
    board.cancel_after_reads = Some((ticks * 2, cancel.clone()));
    poll.run(board, settings, &cancel)
        .expect("run should stop cleanly on cancellation");
    poll
}

#[test]
fn steady_run_records_history_and_blanks_outputs() {
    let mut board = MockBoard::new();
    board.script_celsius(&[21.0]);
    board.script_lux(&[1500.0]);

    let poll = run_ticks(&mut board, &Settings::default(), 4);
    let ds = poll.dataset();

    assert_eq!(ds.temperature.len(), 4);
    assert_eq!(ds.illuminance.len(), 4);
    assert_eq!(ds.time.len(), 5, "seed entry plus one per tick");
    assert!(ds.temperature.iter().all(|t| (t - 21.0).abs() < 0.5));

    // Blanked on exit: discrete LEDs low, bank reset as the last frame.
    let pins = PinMap::default();
    assert!(!board.pin_level(pins.alert));
    assert!(!board.pin_level(pins.rise));
    assert!(!board.pin_level(pins.fall));
    let frames = board.latched_frames(pins.led_bank);
    assert_eq!(frames.last(), Some(&LedPattern::Reset.bits()));
}

#[test]
fn above_band_with_bright_light_latches_the_hot_high_frame() {
    let mut board = MockBoard::new();
    // Band [18, 20]: 21 °C is one tier above it; 1500 lux forces the fan high.
    board.script_celsius(&[21.0]);
    board.script_lux(&[1500.0]);

    run_ticks(&mut board, &Settings::default(), 2);

    let frames = board.latched_frames(PinMap::default().led_bank);
    assert!(
        frames.contains(&LedPattern::SlightlyHotVentHigh.bits()),
        "expected the slightly-hot/fan-high frame in {frames:#06x?}"
    );
}

#[test]
fn dim_light_keeps_the_fan_low() {
    let mut board = MockBoard::new();
    board.script_celsius(&[21.0]);
    board.script_lux(&[700.0]);

    run_ticks(&mut board, &Settings::default(), 2);

    let frames = board.latched_frames(PinMap::default().led_bank);
    assert!(frames.contains(&LedPattern::SlightlyHotVentLow.bits()));
    assert!(!frames.contains(&LedPattern::SlightlyHotVentHigh.bits()));
}

#[test]
fn temperature_jump_raises_the_rise_alert() {
    let mut board = MockBoard::new();
    // Flat, then a 10-degree step: the derivative jumps well past the
    // rapid-change threshold once the step lands.
    board.script_celsius(&[20.0, 20.0, 20.0, 30.0, 30.0, 30.0]);
    board.script_lux(&[700.0]);

    run_ticks(&mut board, &Settings::default(), 6);

    let pins = PinMap::default();
    assert!(board.ever_wrote(pins.alert, true), "common alert LED");
    assert!(board.ever_wrote(pins.rise, true), "rise LED");
    let frames = board.latched_frames(pins.led_bank);
    assert!(frames.contains(&LedPattern::RapidChangeAlert.bits()));

    // Alert lines are released again before the run ends.
    assert!(!board.pin_level(pins.alert));
    assert!(!board.pin_level(pins.rise));
}

#[test]
fn time_axis_stays_chronological_across_runs() {
    let mut board = MockBoard::new();
    board.script_celsius(&[21.0]);
    board.script_lux(&[700.0]);

    let pins = PinMap::default();
    let mut poll = PollingLoop::new(&pins, Timing::instant());
    let settings = Settings::default();

    // First run: three ticks, then the operator stops the system.
    let first = CancelToken::new();
    board.cancel_after_reads = Some((6, first.clone()));
    poll.run(&mut board, &settings, &first).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(50));

    // Second run on the same loop: the dataset, and with it the time
    // axis, carries over. The read count is cumulative across runs.
    let second = CancelToken::new();
    board.cancel_after_reads = Some((12, second.clone()));
    poll.run(&mut board, &settings, &second).unwrap();

    let times = poll.dataset().time.to_vec();
    assert_eq!(times.len(), 7, "seed entry plus six ticks");
    assert!(
        times.windows(2).all(|w| w[0] <= w[1]),
        "time axis must stay chronological across runs, got {times:?}"
    );
}

#[test]
fn bank_is_reset_before_the_alert_sequence() {
    let mut board = MockBoard::new();
    board.script_celsius(&[20.0, 20.0, 20.0, 30.0, 30.0, 30.0]);
    board.script_lux(&[700.0]);

    run_ticks(&mut board, &Settings::default(), 6);

    let pins = PinMap::default();
    let alert_raised = board
        .calls
        .iter()
        .position(|c| *c == Call::WriteDigital(pins.alert, true))
        .expect("the jump must raise the alert");

    // The alert sequence holds the display for its dwell, so the bank
    // must already be blanked when it starts; otherwise the previous
    // tick's frame stays lit for the whole alert.
    let last_before = board
        .latched_frames_indexed(pins.led_bank)
        .into_iter()
        .filter(|(index, _)| *index < alert_raised)
        .next_back()
        .map(|(_, frame)| frame);
    assert_eq!(last_before, Some(LedPattern::Reset.bits()));
}

#[test]
fn board_failure_ends_the_run_with_the_read_error() {
    let mut board = MockBoard::new();
    board.script_celsius(&[21.0]);
    board.script_lux(&[700.0]);
    board.fail_reads_after = Some(4);

    let pins = PinMap::default();
    let mut poll = PollingLoop::new(&pins, Timing::instant());
    let err = poll
        .run(&mut board, &Settings::default(), &CancelToken::new())
        .expect_err("third tick's read must fail");
    assert_eq!(err, BoardError::ReadFailed(pins.therm_channel));

    // Two complete ticks of data survive the failure.
    assert_eq!(poll.dataset().temperature.len(), 2);
}

#[test]
fn pre_cancelled_run_touches_no_sensors() {
    let mut board = MockBoard::new();
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut poll = PollingLoop::new(&PinMap::default(), Timing::instant());
    poll.run(&mut board, &Settings::default(), &cancel).unwrap();

    assert!(
        !board.calls.iter().any(|c| matches!(c, Call::ReadAnalog(_))),
        "no sampling after cancellation"
    );
    // The outputs are still blanked.
    let frames = board.latched_frames(PinMap::default().led_bank);
    assert_eq!(frames.last(), Some(&LedPattern::Reset.bits()));
}
