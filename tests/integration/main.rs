//! Integration test driver for `tests/integration/`.
//!
//! Each `mod` below maps to a file that exercises a subsystem against the
//! recording mock board. Everything runs on the host; no hardware, no
//! real dwells.

mod loop_tests;
mod mock_board;
