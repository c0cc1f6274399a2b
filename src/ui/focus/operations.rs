pub mod events;
pub mod tree;

// Re-exports
pub use events::{EventSink, Listener};
pub use tree::ControlTree;
