// Pure input helpers (no device I/O)

pub mod classify;
pub mod repeat;

pub use classify::{calculate_stick_calibration, stick_direction};
pub use repeat::StickRepeat;
