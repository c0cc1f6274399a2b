//! Focus navigation for UI control trees driven by keyboard or gamepad input.

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod ui;

pub use config::NavConfig;
pub use error::{ConfigError, LoggingError, NavError};
pub use ui::controls::{Button, NavigableControl, TextEdit};
pub use ui::focus::{
    ControlId, ControlTree, EventFlow, EventSink, FocusState, FrameInput, MovementKind,
    NavDirection, NavEvent, NavEventKind, NavInput, NavMovement, NavOutcome, NavServices,
    NavigationManager, RootId, Startup, StartupState,
};
