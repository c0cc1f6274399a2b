// Input device operations - evdev I/O

pub mod device;

pub use device::{scan_gamepads, InputDevice};
