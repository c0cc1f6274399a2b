// Config file operations

pub mod io;

pub use io::{load_cfg, load_cfg_or_default, save_cfg};
