// Event plumbing shared by the control tree and controls

use crate::ui::focus::types::{EventFlow, NavEvent, NavEventKind};

/// Listener attached to a node; sees events raised by the node and its descendants
pub type Listener = Box<dyn FnMut(&NavEvent) -> EventFlow>;

/// Collects the events a control raises while handling a navigation call.
///
/// The tree bubbles them from the control once the call returns.
#[derive(Debug, Default)]
pub struct EventSink {
    raised: Vec<NavEventKind>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, kind: NavEventKind) {
        self.raised.push(kind);
    }

    pub fn is_empty(&self) -> bool {
        self.raised.is_empty()
    }

    pub fn raised(&self) -> &[NavEventKind] {
        &self.raised
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, NavEventKind> {
        self.raised.drain(..)
    }
}
