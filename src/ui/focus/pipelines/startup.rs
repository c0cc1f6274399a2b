// Deferred navigation startup
//
// A UI root registers its manager as soon as it is constructed, but navigation
// only starts once the host reports that the surface finished initializing.

use crate::error::{programming_error, NavError};
use crate::ui::focus::operations::ControlTree;
use crate::ui::focus::pipelines::manager::NavigationManager;
use crate::ui::focus::pipelines::registry::NavServices;
use crate::ui::focus::types::RootId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    WaitingForSurface,
    Ready,
}

/// Startup handshake for one UI root
#[derive(Debug)]
pub struct Startup {
    root: RootId,
    state: StartupState,
}

impl Startup {
    /// Register `manager` for the tree's root and wait for the surface
    pub fn new(
        services: &mut NavServices,
        tree: &ControlTree,
        manager: NavigationManager,
    ) -> Result<Self, NavError> {
        services.register(tree.root_id(), manager)?;
        Ok(Self {
            root: tree.root_id(),
            state: StartupState::WaitingForSurface,
        })
    }

    pub fn root(&self) -> RootId {
        self.root
    }

    pub fn state(&self) -> StartupState {
        self.state
    }

    /// Call every frame until it returns `Ready`.
    ///
    /// The first poll with `surface_ready` marks the tree ready and runs the
    /// initial refresh; later polls do nothing.
    pub fn poll(
        &mut self,
        surface_ready: bool,
        services: &mut NavServices,
        tree: &mut ControlTree,
    ) -> Result<StartupState, NavError> {
        if self.state == StartupState::Ready || !surface_ready {
            return Ok(self.state);
        }
        if tree.root_id() != self.root {
            return Err(programming_error(NavError::NotRegistered(tree.root_id())));
        }
        let Some(manager) = services.get_mut(self.root) else {
            return Err(programming_error(NavError::NotRegistered(self.root)));
        };

        tree.mark_ready();
        manager.on_control_states_updated(tree)?;
        self.state = StartupState::Ready;
        tracing::info!(root = %self.root, controls = tree.candidates().len(), "navigation started");
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FocusRecovery, NavConfig};
    use crate::ui::controls::Button;

    #[test]
    fn test_waits_for_surface() {
        let mut tree = ControlTree::new();
        let ok = tree.add_control(None, "ok", Button::new("OK")).unwrap();
        let mut services = NavServices::new();
        let config = NavConfig {
            focus_recovery: FocusRecovery::ReacquireFirst,
            ..NavConfig::default()
        };
        let mut startup = Startup::new(&mut services, &tree, NavigationManager::new(&config)).unwrap();

        assert_eq!(
            startup.poll(false, &mut services, &mut tree).unwrap(),
            StartupState::WaitingForSurface
        );
        assert!(!tree.is_ready());

        assert_eq!(startup.poll(true, &mut services, &mut tree).unwrap(), StartupState::Ready);
        assert!(tree.is_ready());
        assert!(!tree.is_dirty());
        assert_eq!(services.get(tree.root_id()).and_then(|m| m.focused()), Some(ok));

        // Later polls leave focus alone
        services.get_mut(tree.root_id()).unwrap().clear_focus(&mut tree).unwrap();
        startup.poll(true, &mut services, &mut tree).unwrap();
        assert_eq!(services.get(tree.root_id()).and_then(|m| m.focused()), None);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "no navigation manager"))]
    fn test_unregistered_root_is_rejected() {
        let mut tree = ControlTree::new();
        let mut services = NavServices::new();
        let mut startup = Startup::new(&mut services, &tree, NavigationManager::default()).unwrap();
        services.unregister(tree.root_id());

        let result = startup.poll(true, &mut services, &mut tree);
        assert!(matches!(result, Err(NavError::NotRegistered(_))));
        assert_eq!(startup.state(), StartupState::WaitingForSurface);
    }
}
