//! Keyboard mapping for the demo window

use eframe::egui::{Key, Modifiers};
use uinav::{NavDirection, NavInput};

/// Map a pressed key to a navigation input
pub fn key_to_nav(key: Key, modifiers: Modifiers) -> Option<NavInput> {
    match key {
        Key::ArrowUp => Some(NavInput::Direction(NavDirection::Up)),
        Key::ArrowDown => Some(NavInput::Direction(NavDirection::Down)),
        Key::ArrowLeft => Some(NavInput::Direction(NavDirection::Left)),
        Key::ArrowRight => Some(NavInput::Direction(NavDirection::Right)),
        Key::Enter => Some(NavInput::Commit),
        Key::Escape => Some(NavInput::Cancel),
        Key::Tab if modifiers.shift => Some(NavInput::TabPrev),
        Key::Tab => Some(NavInput::TabNext),
        _ => None,
    }
}

/// Characters a numeric field accepts from typed text
pub fn numeric_chars(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_actions() {
        assert_eq!(
            key_to_nav(Key::ArrowLeft, Modifiers::NONE),
            Some(NavInput::Direction(NavDirection::Left))
        );
        assert_eq!(key_to_nav(Key::Enter, Modifiers::NONE), Some(NavInput::Commit));
        assert_eq!(key_to_nav(Key::Escape, Modifiers::NONE), Some(NavInput::Cancel));
        assert_eq!(key_to_nav(Key::A, Modifiers::NONE), None);
    }

    #[test]
    fn test_shift_tab_goes_back() {
        assert_eq!(key_to_nav(Key::Tab, Modifiers::NONE), Some(NavInput::TabNext));
        assert_eq!(key_to_nav(Key::Tab, Modifiers::SHIFT), Some(NavInput::TabPrev));
    }

    #[test]
    fn test_numeric_filter() {
        assert_eq!(numeric_chars("-1a2.5 "), "-12.5");
    }
}
