use std::any::Any;

use crate::ui::controls::NavigableControl;
use crate::ui::focus::operations::EventSink;
use crate::ui::focus::types::{MovementKind, NavDirection, NavEventKind, NavMovement};

/// Single-line text field.
///
/// Directional input always stays inside the field: Left/Right move the caret,
/// Up/Down step the numeric value (or jump to the ends for plain text). Focus
/// leaves through tab navigation, cancel, or a pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    text: String,
    caret: usize, // In chars
    numeric_step: Option<f64>,
    committed: String,
    selectable: bool,
}

impl TextEdit {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            caret: text.chars().count(),
            numeric_step: None,
            committed: text.to_string(),
            selectable: true,
        }
    }

    /// Treat the content as a number stepped by Up/Down
    pub fn with_numeric_step(mut self, step: f64) -> Self {
        self.numeric_step = Some(step);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content; the caret moves to the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = self.char_len();
    }

    /// Text as of the last commit (or focus entry)
    pub fn committed_text(&self) -> &str {
        &self.committed
    }

    /// Accept the current text as the revert point
    pub fn commit(&mut self) {
        self.committed = self.text.clone();
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.text.trim().parse().ok()
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset(self.caret);
        self.text.insert_str(at, s);
        self.caret += s.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        let at = self.byte_offset(self.caret - 1);
        self.text.remove(at);
        self.caret -= 1;
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn step_value(&mut self, step: f64, events: &mut EventSink) {
        if let Some(value) = self.numeric_value() {
            self.text = format!("{}", value + step);
            self.caret = self.char_len();
            events.raise(NavEventKind::ValueChanged);
        }
    }
}

impl NavigableControl for TextEdit {
    fn is_selectable(&self) -> bool {
        self.selectable
    }

    fn on_navigation_movement(&mut self, movement: NavMovement, events: &mut EventSink) -> bool {
        if movement.kind == MovementKind::Navigation {
            return false;
        }

        // Arrow keys belong to the caret while the field is focused
        match (movement.direction, self.numeric_step) {
            (NavDirection::Left, _) => self.caret = self.caret.saturating_sub(1),
            (NavDirection::Right, _) => self.caret = (self.caret + 1).min(self.char_len()),
            (NavDirection::Up, Some(step)) => self.step_value(step, events),
            (NavDirection::Down, Some(step)) => self.step_value(-step, events),
            (NavDirection::Up, None) => self.caret = 0,
            (NavDirection::Down, None) => self.caret = self.char_len(),
        }
        true
    }

    fn on_navigation_commit_selection(&mut self, events: &mut EventSink) {
        self.commit();
        events.raise(NavEventKind::Committed);
    }

    fn on_navigation_cancel(&mut self, events: &mut EventSink) -> bool {
        if self.text == self.committed {
            return false;
        }
        self.text = self.committed.clone();
        self.caret = self.char_len();
        events.raise(NavEventKind::ValueChanged);
        true
    }

    fn on_selection_changed(&mut self, selected: bool) {
        if selected {
            self.committed = self.text.clone();
            self.caret = self.char_len();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
