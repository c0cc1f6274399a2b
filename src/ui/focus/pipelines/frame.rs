// Per-frame input queue
//
// Hosts collect navigation inputs while handling window events, then hand the
// whole batch to the manager once per frame.

use std::collections::VecDeque;

use crate::error::NavError;
use crate::ui::focus::operations::ControlTree;
use crate::ui::focus::pipelines::manager::NavigationManager;
use crate::ui::focus::types::{NavInput, NavOutcome};

#[derive(Debug, Default)]
pub struct FrameInput {
    pending: VecDeque<NavInput>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, input: NavInput) {
        self.pending.push_back(input);
    }

    pub fn extend(&mut self, inputs: impl IntoIterator<Item = NavInput>) {
        self.pending.extend(inputs);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drain queued inputs through `manager`, oldest first.
    ///
    /// A tree left dirty by the host is refreshed before the first input. On
    /// error the remaining inputs are dropped.
    pub fn process(
        &mut self,
        manager: &mut NavigationManager,
        tree: &mut ControlTree,
    ) -> Result<Vec<NavOutcome>, NavError> {
        if tree.is_dirty() {
            let refreshed = manager
                .on_control_states_updated(tree)
                .inspect_err(|_| self.pending.clear())?;
            if refreshed.focus_changed() {
                tracing::debug!(outcome = ?refreshed, "focus changed by refresh");
            }
        }

        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(input) = self.pending.pop_front() {
            match manager.process_input(tree, input) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    self.pending.clear();
                    return Err(err);
                }
            }
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::Button;
    use crate::ui::focus::types::NavDirection;

    #[test]
    fn test_refreshes_before_inputs() {
        let mut tree = ControlTree::new();
        tree.mark_ready();
        let a = tree.add_control(None, "a", Button::new("A")).unwrap();
        let b = tree.add_control(None, "b", Button::new("B")).unwrap();
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, a).unwrap();

        tree.set_enabled(a, false).unwrap();
        let mut frame = FrameInput::new();
        frame.extend([NavInput::Direction(NavDirection::Down), NavInput::Commit]);
        assert_eq!(frame.len(), 2);

        let outcomes = frame.process(&mut manager, &mut tree).unwrap();
        assert_eq!(
            outcomes,
            vec![NavOutcome::FocusMoved { from: None, to: b }, NavOutcome::Committed(b)]
        );
        assert!(frame.is_empty());
        assert!(!tree.is_dirty());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "not ready"))]
    fn test_error_drops_pending_inputs() {
        let mut tree = ControlTree::new();
        tree.add_control(None, "a", Button::new("A")).unwrap();
        tree.take_dirty();
        let mut manager = NavigationManager::default();

        let mut frame = FrameInput::new();
        frame.push(NavInput::Commit);
        frame.push(NavInput::TabNext);

        assert!(frame.process(&mut manager, &mut tree).is_err());
        assert!(frame.is_empty());
    }
}
