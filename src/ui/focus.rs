pub mod operations;
pub mod pipelines;
pub mod pure;
pub mod types;


// Re-exports
pub use operations::{ControlTree, EventSink, Listener};
pub use pipelines::{FrameInput, NavServices, NavigationManager, Startup, StartupState};
pub use pure::Rect;
pub use types::{
    ControlId, EventFlow, FocusState, MovementKind, NavDirection, NavEvent, NavEventKind,
    NavInput, NavMovement, NavOutcome, RootId,
};
