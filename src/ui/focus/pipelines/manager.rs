// Navigation state machine for one UI root
//
// The manager only remembers which control is focused and which root it serves.
// Everything else (the candidate set, eligibility, control behavior) is read from
// the tree passed into each call.

use crate::config::{FocusRecovery, NavConfig, SelectionPolicy};
use crate::error::{programming_error, NavError};
use crate::ui::focus::operations::ControlTree;
use crate::ui::focus::pure::{find_nearest_index, step_in_order, tab_target, Rect};
use crate::ui::focus::types::{
    ControlId, FocusState, NavDirection, NavInput, NavMovement, NavOutcome, RootId,
};

#[derive(Debug, Clone)]
pub struct NavigationManager {
    root: Option<RootId>,
    focused: Option<ControlId>,
    policy: SelectionPolicy,
    wrap_around: bool,
    recovery: FocusRecovery,
}

/// What the remembered focus amounts to in the tree handed to a call
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Unfocused,
    Live(ControlId),
    /// Still in the tree, but disabled, hidden or unselectable since the last refresh
    Stale(ControlId),
    Removed,
}

impl Default for NavigationManager {
    fn default() -> Self {
        Self::new(&NavConfig::default())
    }
}

impl NavigationManager {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            root: None,
            focused: None,
            policy: config.selection_policy,
            wrap_around: config.wrap_around,
            recovery: config.focus_recovery,
        }
    }

    /// Root this manager serves, once registered or first used
    pub fn root(&self) -> Option<RootId> {
        self.root
    }

    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    pub fn state(&self) -> FocusState {
        match self.focused {
            Some(id) => FocusState::Focused(id),
            None => FocusState::Unfocused,
        }
    }

    /// Tie the manager to `root`. Rebinding to another root is a programming error.
    pub(crate) fn bind(&mut self, root: RootId) -> Result<(), NavError> {
        match self.root {
            Some(bound) if bound != root => Err(programming_error(NavError::TreeMismatch {
                manager: bound,
                tree: root,
            })),
            _ => {
                self.root = Some(root);
                Ok(())
            }
        }
    }

    fn ensure_ready(&mut self, tree: &ControlTree) -> Result<(), NavError> {
        self.bind(tree.root_id())?;
        if tree.is_ready() {
            Ok(())
        } else {
            Err(programming_error(NavError::NotReady(tree.root_id())))
        }
    }

    /// Route a host input to the matching operation
    pub fn process_input(&mut self, tree: &mut ControlTree, input: NavInput) -> Result<NavOutcome, NavError> {
        match input {
            NavInput::Direction(direction) => self.process_directional_input(tree, direction),
            NavInput::Commit => self.process_commit_input(tree),
            NavInput::Cancel => self.process_cancel_input(tree),
            NavInput::TabNext => self.process_tab_input(tree, true),
            NavInput::TabPrev => self.process_tab_input(tree, false),
        }
    }

    /// Move focus in `direction`, or let the focused control consume the movement.
    ///
    /// From the unfocused state this only enters focus at the first candidate.
    pub fn process_directional_input(
        &mut self,
        tree: &mut ControlTree,
        direction: NavDirection,
    ) -> Result<NavOutcome, NavError> {
        self.ensure_ready(tree)?;
        let adopted = self.adopt_external_focus(tree);

        let current = match self.anchor(tree) {
            Anchor::Live(current) => current,
            Anchor::Unfocused => {
                return Ok(match tree.candidates().first() {
                    Some(&first) => self.transfer(tree, first),
                    None => NavOutcome::Unchanged,
                });
            }
            Anchor::Stale(stale) => {
                return Ok(match self.next_target(tree, stale, direction) {
                    Some(next) => self.transfer(tree, next),
                    None => self.recover(tree),
                });
            }
            Anchor::Removed => return Ok(self.recover(tree)),
        };

        if tree.dispatch_movement(current, NavMovement::input(direction))
            || tree.dispatch_movement(current, NavMovement::navigation(direction))
        {
            return Ok(adopted.unwrap_or(NavOutcome::Consumed(current)));
        }

        match self.next_target(tree, current, direction) {
            Some(next) => Ok(self.transfer(tree, next)),
            None => Ok(adopted.unwrap_or(NavOutcome::Unchanged)),
        }
    }

    /// Deliver a commit to the focused control. Selection is left as is.
    pub fn process_commit_input(&mut self, tree: &mut ControlTree) -> Result<NavOutcome, NavError> {
        self.ensure_ready(tree)?;
        match self.anchor(tree) {
            Anchor::Live(current) => {
                tree.dispatch_commit(current);
                Ok(NavOutcome::Committed(current))
            }
            Anchor::Unfocused => Ok(NavOutcome::Unchanged),
            Anchor::Stale(_) | Anchor::Removed => Ok(self.recover(tree)),
        }
    }

    /// Offer a cancel to the focused control; unconsumed cancels drop focus
    pub fn process_cancel_input(&mut self, tree: &mut ControlTree) -> Result<NavOutcome, NavError> {
        self.ensure_ready(tree)?;
        match self.anchor(tree) {
            Anchor::Live(current) => {
                if tree.dispatch_cancel(current) {
                    return Ok(NavOutcome::Consumed(current));
                }
                Ok(self.drop_focus(tree))
            }
            Anchor::Unfocused => Ok(NavOutcome::Unchanged),
            Anchor::Stale(_) | Anchor::Removed => Ok(self.recover(tree)),
        }
    }

    /// Cycle focus in tree order without consulting the focused control
    pub fn process_tab_input(&mut self, tree: &mut ControlTree, forward: bool) -> Result<NavOutcome, NavError> {
        self.ensure_ready(tree)?;
        let adopted = self.adopt_external_focus(tree);

        let anchor = match self.anchor(tree) {
            Anchor::Live(id) | Anchor::Stale(id) => Some(id),
            Anchor::Unfocused => None,
            Anchor::Removed => return Ok(self.recover(tree)),
        };

        let (ring, position) = ring_around(tree, anchor, |_| true);
        let next = tab_target(ring.len(), position, forward)
            .map(|idx| ring[idx])
            .filter(|next| Some(*next) != anchor);
        match next {
            Some(next) => Ok(self.transfer(tree, next)),
            None if self.focused.is_some_and(|id| !tree.is_candidate(id)) => Ok(self.recover(tree)),
            None => Ok(adopted.unwrap_or(NavOutcome::Unchanged)),
        }
    }

    /// Focus a specific control
    pub fn focus(&mut self, tree: &mut ControlTree, id: ControlId) -> Result<NavOutcome, NavError> {
        self.ensure_ready(tree)?;
        if !tree.contains(id) {
            return Err(NavError::UnknownControl(id));
        }
        if !tree.is_candidate(id) {
            return Err(NavError::NotNavigable(id));
        }
        if self.focused == Some(id) {
            return Ok(NavOutcome::Unchanged);
        }
        Ok(self.transfer(tree, id))
    }

    pub fn clear_focus(&mut self, tree: &mut ControlTree) -> Result<NavOutcome, NavError> {
        self.bind(tree.root_id())?;
        Ok(self.drop_focus(tree))
    }

    /// Re-validate focus after the host changed the tree.
    ///
    /// Focus on a removed or ineligible control is dropped, then re-acquired or
    /// left empty depending on the configured recovery.
    pub fn on_control_states_updated(&mut self, tree: &mut ControlTree) -> Result<NavOutcome, NavError> {
        self.ensure_ready(tree)?;
        tree.take_dirty();

        for stray in tree.selected_controls() {
            if Some(stray) != self.focused {
                tracing::warn!(control = %stray, "deselecting control not owned by the manager");
                tree.set_selected(stray, false);
            }
        }

        if let Some(current) = self.focused {
            if tree.is_candidate(current) {
                return Ok(NavOutcome::Unchanged);
            }
            tracing::debug!(control = %current, "focused control is no longer navigable");
        }
        Ok(self.recover(tree))
    }

    fn anchor(&self, tree: &ControlTree) -> Anchor {
        let Some(focused) = self.focused else {
            return Anchor::Unfocused;
        };
        if tree.is_candidate(focused) {
            Anchor::Live(focused)
        } else if tree.contains(focused) {
            tracing::warn!(control = %focused, "focused control became ineligible without a refresh");
            Anchor::Stale(focused)
        } else {
            tracing::warn!(control = %focused, "focused control was removed without a refresh");
            Anchor::Removed
        }
    }

    /// Replace focus that can no longer be used, per the configured recovery
    fn recover(&mut self, tree: &mut ControlTree) -> NavOutcome {
        if self.recovery == FocusRecovery::ReacquireFirst {
            if let Some(&first) = tree.candidates().first() {
                return self.transfer(tree, first);
            }
        }
        self.drop_focus(tree)
    }

    fn drop_focus(&mut self, tree: &mut ControlTree) -> NavOutcome {
        match self.focused.take() {
            Some(from) => {
                tree.set_selected(from, false);
                tracing::debug!(control = %from, "focus cleared");
                NavOutcome::FocusCleared { from }
            }
            None => NavOutcome::Unchanged,
        }
    }

    /// A pointer-focused control becomes the anchor for the next movement
    fn adopt_external_focus(&mut self, tree: &mut ControlTree) -> Option<NavOutcome> {
        let hinted = tree.take_external_focus_hint()?;
        if self.focused == Some(hinted) || !tree.is_candidate(hinted) {
            return None;
        }
        tracing::debug!(control = %hinted, "adopting pointer focus as navigation anchor");
        Some(self.transfer(tree, hinted))
    }

    fn transfer(&mut self, tree: &mut ControlTree, to: ControlId) -> NavOutcome {
        let from = self.focused.take();
        if let Some(from) = from {
            tree.set_selected(from, false);
        }
        tree.set_selected(to, true);
        self.focused = Some(to);

        match from {
            Some(from) => tracing::debug!(%from, %to, "focus moved"),
            None => tracing::debug!(%to, "focus entered"),
        }
        NavOutcome::FocusMoved { from, to }
    }

    /// Pick the next candidate in `direction` from `anchor`; never `anchor` itself.
    ///
    /// `anchor` need not be a candidate any more: its tree position and last rect
    /// still apply.
    fn next_target(&self, tree: &ControlTree, anchor: ControlId, direction: NavDirection) -> Option<ControlId> {
        if let Some(pinned) = tree.neighbor(anchor, direction) {
            if pinned != anchor && tree.is_candidate(pinned) {
                return Some(pinned);
            }
            tracing::trace!(control = %pinned, "pinned neighbor not eligible, using policy");
        }

        let forward = direction.is_forward();
        if self.policy == SelectionPolicy::Spatial {
            if let Some(source) = tree.rect(anchor) {
                let placed: Vec<(ControlId, Rect)> = tree
                    .candidates()
                    .into_iter()
                    .filter(|id| *id != anchor)
                    .filter_map(|id| tree.rect(id).map(|rect| (id, rect)))
                    .collect();
                if !placed.is_empty() {
                    let rects: Vec<Rect> = placed.iter().map(|(_, rect)| *rect).collect();
                    if let Some(idx) = find_nearest_index(source, &rects, direction) {
                        return Some(placed[idx].0);
                    }
                    // Controls the host never placed are still reachable in tree order
                    return self.step_around(tree, anchor, forward, |id| tree.rect(id).is_none());
                }
            }
        }

        self.step_around(tree, anchor, forward, |_| true)
    }

    fn step_around(
        &self,
        tree: &ControlTree,
        anchor: ControlId,
        forward: bool,
        include: impl Fn(ControlId) -> bool,
    ) -> Option<ControlId> {
        let (ring, position) = ring_around(tree, Some(anchor), include);
        step_in_order(ring.len(), position, forward, self.wrap_around)
            .map(|idx| ring[idx])
            .filter(|next| *next != anchor)
    }
}

/// Candidates in tree order that pass `include`, with `anchor` kept at its own
/// position even when it is no longer a candidate
fn ring_around(
    tree: &ControlTree,
    anchor: Option<ControlId>,
    include: impl Fn(ControlId) -> bool,
) -> (Vec<ControlId>, Option<usize>) {
    let ring: Vec<ControlId> = tree
        .navigation_order()
        .into_iter()
        .filter(|id| Some(*id) == anchor || (tree.is_candidate(*id) && include(*id)))
        .collect();
    let position = anchor.and_then(|anchor| ring.iter().position(|id| *id == anchor));
    (ring, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::{Button, TextEdit};

    fn ready_tree() -> ControlTree {
        let mut tree = ControlTree::new();
        tree.mark_ready();
        tree
    }

    fn spatial_grid(tree: &mut ControlTree) -> [ControlId; 4] {
        // a b
        // c d
        let a = tree.add_control(None, "a", Button::new("A")).unwrap();
        let b = tree.add_control(None, "b", Button::new("B")).unwrap();
        let c = tree.add_control(None, "c", Button::new("C")).unwrap();
        let d = tree.add_control(None, "d", Button::new("D")).unwrap();
        tree.set_rect(a, Rect::new(0.0, 0.0, 100.0, 40.0)).unwrap();
        tree.set_rect(b, Rect::new(120.0, 0.0, 100.0, 40.0)).unwrap();
        tree.set_rect(c, Rect::new(0.0, 60.0, 100.0, 40.0)).unwrap();
        tree.set_rect(d, Rect::new(120.0, 60.0, 100.0, 40.0)).unwrap();
        [a, b, c, d]
    }

    #[test]
    fn test_spatial_navigation_follows_layout() {
        let mut tree = ready_tree();
        let [a, b, c, d] = spatial_grid(&mut tree);
        let mut manager = NavigationManager::default();

        manager.process_directional_input(&mut tree, NavDirection::Down).unwrap();
        assert_eq!(manager.focused(), Some(a));

        manager.process_directional_input(&mut tree, NavDirection::Down).unwrap();
        assert_eq!(manager.focused(), Some(c));
        manager.process_directional_input(&mut tree, NavDirection::Right).unwrap();
        assert_eq!(manager.focused(), Some(d));
        manager.process_directional_input(&mut tree, NavDirection::Up).unwrap();
        assert_eq!(manager.focused(), Some(b));

        // Nothing further right: stay put
        let outcome = manager.process_directional_input(&mut tree, NavDirection::Right).unwrap();
        assert_eq!(outcome, NavOutcome::Unchanged);
        assert_eq!(manager.focused(), Some(b));
    }

    #[test]
    fn test_spatial_skips_ineligible() {
        let mut tree = ready_tree();
        let [a, _b, c, d] = spatial_grid(&mut tree);
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, a).unwrap();

        tree.set_enabled(c, false).unwrap();
        manager.on_control_states_updated(&mut tree).unwrap();

        manager.process_directional_input(&mut tree, NavDirection::Down).unwrap();
        assert_eq!(manager.focused(), Some(d));
    }

    #[test]
    fn test_tree_order_policy_without_wrap() {
        let mut tree = ready_tree();
        let [a, b, c, d] = spatial_grid(&mut tree);
        let config = NavConfig {
            selection_policy: SelectionPolicy::TreeOrder,
            wrap_around: false,
            ..NavConfig::default()
        };
        let mut manager = NavigationManager::new(&config);
        manager.focus(&mut tree, c).unwrap();

        manager.process_directional_input(&mut tree, NavDirection::Right).unwrap();
        assert_eq!(manager.focused(), Some(d));
        let outcome = manager.process_directional_input(&mut tree, NavDirection::Down).unwrap();
        assert_eq!(outcome, NavOutcome::Unchanged);

        manager.process_directional_input(&mut tree, NavDirection::Up).unwrap();
        manager.process_directional_input(&mut tree, NavDirection::Left).unwrap();
        assert_eq!(manager.focused(), Some(b));
        manager.process_directional_input(&mut tree, NavDirection::Left).unwrap();
        assert_eq!(manager.focused(), Some(a));
    }

    #[test]
    fn test_pinned_neighbor_wins() {
        let mut tree = ready_tree();
        let [a, _b, _c, d] = spatial_grid(&mut tree);
        tree.set_neighbor(a, NavDirection::Right, Some(d)).unwrap();
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, a).unwrap();

        manager.process_directional_input(&mut tree, NavDirection::Right).unwrap();
        assert_eq!(manager.focused(), Some(d));
    }

    #[test]
    fn test_tab_leaves_text_edit() {
        let mut tree = ready_tree();
        let x = tree.add_control(None, "x", TextEdit::new("0")).unwrap();
        let y = tree.add_control(None, "y", TextEdit::new("0")).unwrap();
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, x).unwrap();

        // Arrows stay in the field
        let outcome = manager.process_directional_input(&mut tree, NavDirection::Right).unwrap();
        assert_eq!(outcome, NavOutcome::Consumed(x));

        manager.process_tab_input(&mut tree, true).unwrap();
        assert_eq!(manager.focused(), Some(y));
        manager.process_tab_input(&mut tree, true).unwrap();
        assert_eq!(manager.focused(), Some(x));
        manager.process_tab_input(&mut tree, false).unwrap();
        assert_eq!(manager.focused(), Some(y));
    }

    #[test]
    fn test_cancel_reverts_then_clears() {
        let mut tree = ready_tree();
        let x = tree.add_control(None, "x", TextEdit::new("15")).unwrap();
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, x).unwrap();
        tree.control_mut::<TextEdit>(x).unwrap().insert_str("0");

        assert_eq!(manager.process_cancel_input(&mut tree).unwrap(), NavOutcome::Consumed(x));
        assert_eq!(tree.control::<TextEdit>(x).unwrap().text(), "15");

        assert_eq!(
            manager.process_cancel_input(&mut tree).unwrap(),
            NavOutcome::FocusCleared { from: x }
        );
        assert_eq!(manager.state(), FocusState::Unfocused);
        assert!(!tree.is_selected(x));
        assert_eq!(manager.process_cancel_input(&mut tree).unwrap(), NavOutcome::Unchanged);
    }

    #[test]
    fn test_pointer_focus_becomes_anchor() {
        let mut tree = ready_tree();
        let [a, b, _c, d] = spatial_grid(&mut tree);
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, a).unwrap();

        tree.note_pointer_focus(b).unwrap();
        manager.process_directional_input(&mut tree, NavDirection::Down).unwrap();

        assert_eq!(manager.focused(), Some(d));
        assert!(!tree.is_selected(a));
        assert!(!tree.is_selected(b));
        assert!(!tree.has_external_focus_hint(b));
    }

    #[test]
    fn test_focus_rejects_ineligible() {
        let mut tree = ready_tree();
        let panel = tree.add_element(None, "panel").unwrap();
        let a = tree.add_control(Some(panel), "a", Button::new("A")).unwrap();
        tree.set_visible(panel, false).unwrap();
        let mut manager = NavigationManager::default();

        assert!(matches!(manager.focus(&mut tree, a), Err(NavError::NotNavigable(_))));
        assert!(matches!(manager.focus(&mut tree, panel), Err(NavError::NotNavigable(_))));
        tree.remove(panel).unwrap();
        assert!(matches!(manager.focus(&mut tree, a), Err(NavError::UnknownControl(_))));
    }

    #[test]
    fn test_removed_focus_falls_back_to_recovery() {
        let mut tree = ready_tree();
        let a = tree.add_control(None, "a", Button::new("A")).unwrap();
        let b = tree.add_control(None, "b", Button::new("B")).unwrap();
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, a).unwrap();

        tree.remove(a).unwrap();
        // No refresh: commit must not reach a removed control
        assert_eq!(
            manager.process_commit_input(&mut tree).unwrap(),
            NavOutcome::FocusCleared { from: a }
        );
        assert_eq!(manager.focused(), None);

        manager.process_directional_input(&mut tree, NavDirection::Down).unwrap();
        assert_eq!(manager.focused(), Some(b));
    }

    #[test]
    fn test_spatial_reaches_unplaced_controls() {
        // b a, with c never laid out
        let mut tree = ready_tree();
        let a = tree.add_control(None, "a", Button::new("A")).unwrap();
        let b = tree.add_control(None, "b", Button::new("B")).unwrap();
        let c = tree.add_control(None, "c", Button::new("C")).unwrap();
        tree.set_rect(a, Rect::new(100.0, 0.0, 80.0, 30.0)).unwrap();
        tree.set_rect(b, Rect::new(0.0, 0.0, 80.0, 30.0)).unwrap();
        let mut manager = NavigationManager::default();

        for (direction, expected) in [
            (NavDirection::Left, b),
            (NavDirection::Right, c),
            (NavDirection::Down, c),
            (NavDirection::Up, c),
        ] {
            manager.focus(&mut tree, a).unwrap();
            manager.process_directional_input(&mut tree, direction).unwrap();
            assert_eq!(manager.focused(), Some(expected), "{direction:?} from a");
        }

        // From c, which has no rect, plain tree order applies
        manager.process_directional_input(&mut tree, NavDirection::Left).unwrap();
        assert_eq!(manager.focused(), Some(b));
    }

    #[test]
    fn test_single_candidate_tab_is_unchanged() {
        let mut tree = ready_tree();
        let a = tree.add_control(None, "a", Button::new("A")).unwrap();
        let mut manager = NavigationManager::default();
        manager.focus(&mut tree, a).unwrap();

        assert_eq!(manager.process_tab_input(&mut tree, true).unwrap(), NavOutcome::Unchanged);
        assert!(tree.is_selected(a));
    }

    #[test]
    fn test_reacquire_recovery() {
        let mut tree = ready_tree();
        let a = tree.add_control(None, "a", Button::new("A")).unwrap();
        let b = tree.add_control(None, "b", Button::new("B")).unwrap();
        let config = NavConfig {
            focus_recovery: FocusRecovery::ReacquireFirst,
            ..NavConfig::default()
        };
        let mut manager = NavigationManager::new(&config);

        assert_eq!(
            manager.on_control_states_updated(&mut tree).unwrap(),
            NavOutcome::FocusMoved { from: None, to: a }
        );

        tree.set_enabled(a, false).unwrap();
        assert_eq!(
            manager.on_control_states_updated(&mut tree).unwrap(),
            NavOutcome::FocusMoved { from: Some(a), to: b }
        );
        assert!(!tree.is_selected(a));

        tree.set_enabled(b, false).unwrap();
        assert_eq!(
            manager.on_control_states_updated(&mut tree).unwrap(),
            NavOutcome::FocusCleared { from: b }
        );
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "not ready"))]
    fn test_refresh_before_ready_is_rejected() {
        let mut tree = ControlTree::new();
        tree.add_control(None, "a", Button::new("A")).unwrap();
        let mut manager = NavigationManager::default();

        let result = manager.on_control_states_updated(&mut tree);
        assert!(matches!(result, Err(NavError::NotReady(_))));
    }
}
