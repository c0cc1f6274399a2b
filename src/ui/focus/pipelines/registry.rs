// Per-root manager registry
//
// Exactly one navigation manager may be registered for each UI root.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{programming_error, NavError};
use crate::ui::focus::pipelines::manager::NavigationManager;
use crate::ui::focus::types::RootId;

/// Navigation managers keyed by the UI root they serve
#[derive(Debug, Default)]
pub struct NavServices {
    managers: HashMap<RootId, NavigationManager>,
}

impl NavServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the manager for `root` and bind it to that root.
    ///
    /// A second registration, or a manager already bound elsewhere, is a
    /// programming error.
    pub fn register(
        &mut self,
        root: RootId,
        mut manager: NavigationManager,
    ) -> Result<&mut NavigationManager, NavError> {
        match self.managers.entry(root) {
            Entry::Occupied(_) => Err(programming_error(NavError::DuplicateRegistration(root))),
            Entry::Vacant(slot) => {
                manager.bind(root)?;
                tracing::debug!(%root, "navigation manager registered");
                Ok(slot.insert(manager))
            }
        }
    }

    pub fn is_registered(&self, root: RootId) -> bool {
        self.managers.contains_key(&root)
    }

    pub fn get(&self, root: RootId) -> Option<&NavigationManager> {
        self.managers.get(&root)
    }

    pub fn get_mut(&mut self, root: RootId) -> Option<&mut NavigationManager> {
        self.managers.get_mut(&root)
    }

    /// Drop the manager when its UI root is torn down
    pub fn unregister(&mut self, root: RootId) -> Option<NavigationManager> {
        let removed = self.managers.remove(&root);
        if removed.is_some() {
            tracing::debug!(%root, "navigation manager unregistered");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
