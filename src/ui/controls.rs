//! Controls that can hold navigation focus.

pub mod button;
pub mod text_edit;

pub use button::Button;
pub use text_edit::TextEdit;

use std::any::Any;

use crate::ui::focus::operations::EventSink;
use crate::ui::focus::types::NavMovement;

/// Capability of a UI element that can hold navigation focus.
///
/// Eligibility (enabled and visible up the ancestor chain) is answered by the
/// tree, see [`ControlTree::can_navigate_to_control`](crate::ControlTree::can_navigate_to_control).
/// Events raised into the [`EventSink`] bubble from the control to its ancestors.
pub trait NavigableControl: Any {
    /// Whether the control currently accepts focus at all
    fn is_selectable(&self) -> bool {
        true
    }

    /// Handle a directional movement while focused.
    ///
    /// Return true to consume it; the manager then leaves focus where it is.
    fn on_navigation_movement(&mut self, movement: NavMovement, events: &mut EventSink) -> bool;

    /// The user committed while this control was focused
    fn on_navigation_commit_selection(&mut self, events: &mut EventSink);

    /// The user cancelled while this control was focused; true if consumed
    fn on_navigation_cancel(&mut self, _events: &mut EventSink) -> bool {
        false
    }

    /// Called when the tree flips the control's selection
    fn on_selection_changed(&mut self, _selected: bool) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
