pub mod operations;
pub mod types;

// Re-export types
pub use types::{FocusRecovery, NavConfig, SelectionPolicy, StickConfig};

// Re-export operations
pub use operations::{load_cfg, load_cfg_or_default, save_cfg};
