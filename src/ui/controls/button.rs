use std::any::Any;

use crate::ui::controls::NavigableControl;
use crate::ui::focus::operations::EventSink;
use crate::ui::focus::types::{NavEventKind, NavMovement};

/// Push button; a commit raises `Clicked`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    label: String,
    selectable: bool,
}

impl Button {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            selectable: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }
}

impl NavigableControl for Button {
    fn is_selectable(&self) -> bool {
        self.selectable
    }

    fn on_navigation_movement(&mut self, _movement: NavMovement, _events: &mut EventSink) -> bool {
        false
    }

    fn on_navigation_commit_selection(&mut self, events: &mut EventSink) {
        events.raise(NavEventKind::Clicked);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
