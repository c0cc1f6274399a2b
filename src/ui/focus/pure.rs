pub mod input_map;
pub mod ordering;
pub mod spatial;

// Re-exports
pub use input_map::{is_nav_button, map_button_to_nav};
pub use ordering::{step_in_order, tab_target};
pub use spatial::{find_nearest_index, spatial_score, Rect};
