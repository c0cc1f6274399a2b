//! Gamepad input feeding navigation.
//!
//! Pure stick handling works everywhere; evdev device polling is Linux only.

#[cfg(target_os = "linux")]
pub mod operations;
pub mod pure;
pub mod types;

// Re-exports
#[cfg(target_os = "linux")]
pub use operations::{scan_gamepads, InputDevice};
pub use pure::{calculate_stick_calibration, stick_direction, StickRepeat};
pub use types::{PadButton, StickDirection};
