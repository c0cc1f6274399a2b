pub mod frame;
pub mod manager;
pub mod registry;
pub mod startup;

// Re-exports
pub use frame::FrameInput;
pub use manager::NavigationManager;
pub use registry::NavServices;
pub use startup::{Startup, StartupState};
