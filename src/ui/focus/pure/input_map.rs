// Input mapping from PadButton to NavInput

use crate::input::PadButton;
use crate::ui::focus::types::{NavDirection, NavInput};

/// Map a gamepad button to a navigation input
pub fn map_button_to_nav(button: PadButton) -> Option<NavInput> {
    match button {
        // D-pad and left stick → Directional navigation
        PadButton::Up => Some(NavInput::Direction(NavDirection::Up)),
        PadButton::Down => Some(NavInput::Direction(NavDirection::Down)),
        PadButton::Left => Some(NavInput::Direction(NavDirection::Left)),
        PadButton::Right => Some(NavInput::Direction(NavDirection::Right)),

        // Face buttons
        PadButton::ABtn => Some(NavInput::Commit),
        PadButton::BBtn => Some(NavInput::Cancel),

        // Shoulder buttons → Tab navigation
        PadButton::LB => Some(NavInput::TabPrev),
        PadButton::RB => Some(NavInput::TabNext),

        // Not navigation inputs
        _ => None,
    }
}

/// Check if a button is a navigation-related input
pub fn is_nav_button(button: PadButton) -> bool {
    map_button_to_nav(button).is_some()
}
