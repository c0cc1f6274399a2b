pub mod controls;
pub mod focus;

pub use focus::{ControlTree, NavigationManager};
