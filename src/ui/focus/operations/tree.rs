//! Arena of UI elements that navigation runs over.
//!
//! Nodes are addressed by generational [`ControlId`]s. Parent links are ids, so
//! ancestor walks never hold references into the arena, and a removed node's id
//! simply stops resolving.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::NavError;
use crate::ui::controls::NavigableControl;
use crate::ui::focus::operations::events::{EventSink, Listener};
use crate::ui::focus::pure::Rect;
use crate::ui::focus::types::{
    ControlId, EventFlow, NavDirection, NavEvent, NavEventKind, NavMovement, RootId,
};

static NEXT_ROOT_ID: AtomicU32 = AtomicU32::new(1);

struct Node {
    name: String,
    parent: Option<ControlId>,
    children: Vec<ControlId>,
    enabled: bool,
    visible: bool,
    rect: Option<Rect>,
    control: Option<Box<dyn NavigableControl>>,
    is_selected: bool,
    is_selection_active: bool,
    external_focus_hint: bool,
    neighbors: [Option<ControlId>; 4],
    listeners: Vec<Listener>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The element tree of one UI root
pub struct ControlTree {
    root_id: RootId,
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<ControlId>,
    ready: bool,
    dirty: bool,
}

impl Default for ControlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlTree {
    pub fn new() -> Self {
        Self {
            root_id: RootId(NEXT_ROOT_ID.fetch_add(1, Ordering::Relaxed)),
            slots: Vec::new(),
            free: Vec::new(),
            roots: Vec::new(),
            ready: false,
            dirty: false,
        }
    }

    pub fn root_id(&self) -> RootId {
        self.root_id
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Readiness and change tracking
    // =========================================================================

    /// Called by the host once the UI surface has finished initializing
    pub fn mark_ready(&mut self) {
        if !self.ready {
            tracing::debug!(root = %self.root_id, "UI surface ready");
        }
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether the navigable set may have changed since the last refresh
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag a change made outside the tree (e.g. a control's selectable flag)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Add a plain element (panel, label) that can hold children but not focus
    pub fn add_element(&mut self, parent: Option<ControlId>, name: &str) -> Result<ControlId, NavError> {
        self.insert(parent, name, None)
    }

    /// Add a focusable control
    pub fn add_control(
        &mut self,
        parent: Option<ControlId>,
        name: &str,
        control: impl NavigableControl,
    ) -> Result<ControlId, NavError> {
        self.insert(parent, name, Some(Box::new(control)))
    }

    fn insert(
        &mut self,
        parent: Option<ControlId>,
        name: &str,
        control: Option<Box<dyn NavigableControl>>,
    ) -> Result<ControlId, NavError> {
        if let Some(parent) = parent {
            self.node_or_err(parent)?;
        }

        let node = Node {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            enabled: true,
            visible: true,
            rect: None,
            control,
            is_selected: false,
            is_selection_active: false,
            external_focus_hint: false,
            neighbors: [None; 4],
            listeners: Vec::new(),
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                ControlId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                ControlId { index, generation: 0 }
            }
        };

        match parent.and_then(|parent| self.node_mut(parent)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }

        self.dirty = true;
        Ok(id)
    }

    /// Remove a node and its whole subtree. Their ids stop resolving.
    pub fn remove(&mut self, id: ControlId) -> Result<(), NavError> {
        let parent = self.node_or_err(id)?.parent;
        match parent.and_then(|parent| self.node_mut(parent)) {
            Some(parent_node) => parent_node.children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
        }

        self.dirty = true;
        Ok(())
    }

    fn node(&self, id: ControlId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: ControlId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn node_or_err(&self, id: ControlId) -> Result<&Node, NavError> {
        self.node(id).ok_or(NavError::UnknownControl(id))
    }

    fn node_mut_or_err(&mut self, id: ControlId) -> Result<&mut Node, NavError> {
        self.node_mut(id).ok_or(NavError::UnknownControl(id))
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.node(id).is_some()
    }

    pub fn name(&self, id: ControlId) -> Option<&str> {
        self.node(id).map(|node| node.name.as_str())
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// First node with this name, in tree order
    pub fn find(&self, name: &str) -> Option<ControlId> {
        self.walk()
            .into_iter()
            .find(|id| self.name(*id) == Some(name))
    }

    /// Every live node in depth-first, pre-order
    fn walk(&self) -> Vec<ControlId> {
        let mut order = Vec::new();
        let mut stack: Vec<ControlId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                order.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Controls (nodes carrying a [`NavigableControl`]) in tree order
    pub fn navigation_order(&self) -> Vec<ControlId> {
        self.walk()
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|node| node.control.is_some()))
            .collect()
    }

    /// Controls that may receive focus right now, in tree order
    pub fn candidates(&self) -> Vec<ControlId> {
        self.navigation_order()
            .into_iter()
            .filter(|id| self.is_candidate(*id))
            .collect()
    }

    // =========================================================================
    // Element state
    // =========================================================================

    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) -> Result<(), NavError> {
        let node = self.node_mut_or_err(id)?;
        if node.enabled != enabled {
            node.enabled = enabled;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn set_visible(&mut self, id: ControlId, visible: bool) -> Result<(), NavError> {
        let node = self.node_mut_or_err(id)?;
        if node.visible != visible {
            node.visible = visible;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn is_enabled(&self, id: ControlId) -> bool {
        self.node(id).is_some_and(|node| node.enabled)
    }

    pub fn is_visible(&self, id: ControlId) -> bool {
        self.node(id).is_some_and(|node| node.visible)
    }

    /// Screen rect reported by the renderer; used for spatial navigation
    pub fn set_rect(&mut self, id: ControlId, rect: Rect) -> Result<(), NavError> {
        self.node_mut_or_err(id)?.rect = Some(rect);
        Ok(())
    }

    pub fn rect(&self, id: ControlId) -> Option<Rect> {
        self.node(id).and_then(|node| node.rect)
    }

    /// Pin the target of a direction, overriding the selection policy
    pub fn set_neighbor(
        &mut self,
        id: ControlId,
        direction: NavDirection,
        target: Option<ControlId>,
    ) -> Result<(), NavError> {
        if let Some(target) = target {
            self.node_or_err(target)?;
        }
        self.node_mut_or_err(id)?.neighbors[direction.slot()] = target;
        Ok(())
    }

    pub fn neighbor(&self, id: ControlId, direction: NavDirection) -> Option<ControlId> {
        self.node(id).and_then(|node| node.neighbors[direction.slot()])
    }

    // =========================================================================
    // Eligibility
    // =========================================================================

    /// True iff the node and every ancestor up to the root are enabled and visible
    pub fn can_navigate_to_control(&self, id: ControlId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                return false;
            };
            if !node.enabled || !node.visible {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    /// Carries a control that currently allows selection
    pub fn is_navigable_control(&self, id: ControlId) -> bool {
        self.node(id)
            .and_then(|node| node.control.as_deref())
            .is_some_and(|control| control.is_selectable())
    }

    pub fn is_candidate(&self, id: ControlId) -> bool {
        self.is_navigable_control(id) && self.can_navigate_to_control(id)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn is_selected(&self, id: ControlId) -> bool {
        self.node(id).is_some_and(|node| node.is_selected)
    }

    /// Selected by navigation, or activated by a pointer
    pub fn is_selection_active(&self, id: ControlId) -> bool {
        self.node(id).is_some_and(|node| node.is_selection_active)
    }

    pub fn has_external_focus_hint(&self, id: ControlId) -> bool {
        self.node(id).is_some_and(|node| node.external_focus_hint)
    }

    /// Selected nodes in tree order; never more than one outside of a transfer
    pub fn selected_controls(&self) -> Vec<ControlId> {
        self.walk()
            .into_iter()
            .filter(|id| self.is_selected(*id))
            .collect()
    }

    /// Set a node's selection. Returns whether it changed.
    ///
    /// A true to false transition raises `NavigatedOut` once; repeating the same
    /// value raises nothing.
    pub(crate) fn set_selected(&mut self, id: ControlId, selected: bool) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let was_selected = node.is_selected;
        node.is_selected = selected;
        node.is_selection_active = selected;
        if was_selected == selected {
            return false;
        }

        if let Some(control) = node.control.as_deref_mut() {
            control.on_selection_changed(selected);
        }
        if was_selected {
            self.bubble(id, NavEventKind::NavigatedOut);
        }
        true
    }

    /// Record that a pointer activated this control.
    ///
    /// The next directional input adopts it as the navigation anchor.
    pub fn note_pointer_focus(&mut self, id: ControlId) -> Result<(), NavError> {
        if !self.contains(id) {
            return Err(NavError::UnknownControl(id));
        }
        if !self.is_candidate(id) {
            return Err(NavError::NotNavigable(id));
        }

        // The pointer takes the active selection away from every other node,
        // including the one navigation still has selected.
        for slot in self.slots.iter_mut() {
            if let Some(node) = slot.node.as_mut() {
                node.external_focus_hint = false;
                node.is_selection_active = false;
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.external_focus_hint = true;
            node.is_selection_active = true;
        }
        tracing::trace!(control = %id, "pointer focus noted");
        Ok(())
    }

    /// Consume the pointer focus hint: returns the hinted control, clearing all hints
    pub(crate) fn take_external_focus_hint(&mut self) -> Option<ControlId> {
        let hinted = self
            .walk()
            .into_iter()
            .find(|id| self.has_external_focus_hint(*id));
        if hinted.is_some() {
            for slot in self.slots.iter_mut() {
                if let Some(node) = slot.node.as_mut() {
                    node.external_focus_hint = false;
                }
            }
        }
        hinted
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Attach a listener; it also sees events bubbling up from descendants
    pub fn subscribe(
        &mut self,
        id: ControlId,
        listener: impl FnMut(&NavEvent) -> EventFlow + 'static,
    ) -> Result<(), NavError> {
        self.node_mut_or_err(id)?.listeners.push(Box::new(listener));
        Ok(())
    }

    /// Raise an event from a control's own interaction (e.g. pointer edit finished)
    pub fn raise_event(&mut self, source: ControlId, kind: NavEventKind) -> Result<EventFlow, NavError> {
        self.node_or_err(source)?;
        Ok(self.bubble(source, kind))
    }

    fn bubble(&mut self, source: ControlId, kind: NavEventKind) -> EventFlow {
        tracing::trace!(control = %source, ?kind, "raising event");
        let mut cursor = Some(source);
        while let Some(current) = cursor {
            let Some(node) = self.node_mut(current) else {
                break;
            };
            let event = NavEvent {
                kind,
                source,
                current,
            };
            for listener in node.listeners.iter_mut() {
                if listener(&event) == EventFlow::Handled {
                    return EventFlow::Handled;
                }
            }
            cursor = node.parent;
        }
        EventFlow::Continue
    }

    fn flush(&mut self, source: ControlId, mut events: EventSink) {
        for kind in events.drain() {
            self.bubble(source, kind);
        }
    }

    // =========================================================================
    // Control dispatch
    // =========================================================================

    /// Offer a movement to the control; true if it consumed it
    pub(crate) fn dispatch_movement(&mut self, id: ControlId, movement: NavMovement) -> bool {
        let mut events = EventSink::new();
        let consumed = match self.node_mut(id).and_then(|node| node.control.as_deref_mut()) {
            Some(control) => control.on_navigation_movement(movement, &mut events),
            None => return false,
        };
        self.flush(id, events);
        consumed
    }

    /// Deliver a commit; false if there is no control to receive it
    pub(crate) fn dispatch_commit(&mut self, id: ControlId) -> bool {
        let mut events = EventSink::new();
        match self.node_mut(id).and_then(|node| node.control.as_deref_mut()) {
            Some(control) => control.on_navigation_commit_selection(&mut events),
            None => return false,
        }
        self.flush(id, events);
        true
    }

    /// Deliver a cancel; true if the control consumed it
    pub(crate) fn dispatch_cancel(&mut self, id: ControlId) -> bool {
        let mut events = EventSink::new();
        let consumed = match self.node_mut(id).and_then(|node| node.control.as_deref_mut()) {
            Some(control) => control.on_navigation_cancel(&mut events),
            None => return false,
        };
        self.flush(id, events);
        consumed
    }

    /// Typed access to a control
    pub fn control<T: NavigableControl>(&self, id: ControlId) -> Option<&T> {
        self.node(id)
            .and_then(|node| node.control.as_deref())
            .and_then(|control| control.as_any().downcast_ref::<T>())
    }

    /// Typed mutable access to a control.
    ///
    /// Call [`mark_dirty`](Self::mark_dirty) if the change affects selectability.
    pub fn control_mut<T: NavigableControl>(&mut self, id: ControlId) -> Option<&mut T> {
        self.node_mut(id)
            .and_then(|node| node.control.as_deref_mut())
            .and_then(|control| control.as_any_mut().downcast_mut::<T>())
    }
}
