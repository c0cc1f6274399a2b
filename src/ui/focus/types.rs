//! Focus and navigation types for keyboard/gamepad UI navigation

use std::fmt;

// =============================================================================
// Handles
// =============================================================================

/// Generational handle to a node in a [`ControlTree`](super::ControlTree).
///
/// The tree never hands out references to its nodes; a handle whose slot was
/// freed (and possibly reused) no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Identity of a UI root; one navigation manager is registered per root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(pub(crate) u32);

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ui root {}", self.0)
    }
}

// =============================================================================
// Navigation input
// =============================================================================

/// Direction of navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    pub const ALL: [NavDirection; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Whether tree-order navigation moves forward for this direction
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// How the focused control should interpret a directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    /// Move focus to a different control
    Navigation,
    /// Manipulate the control's own state (caret, value stepping)
    Input,
}

/// A directional movement offered to the focused control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavMovement {
    pub direction: NavDirection,
    pub kind: MovementKind,
}

impl NavMovement {
    pub fn input(direction: NavDirection) -> Self {
        Self {
            direction,
            kind: MovementKind::Input,
        }
    }

    pub fn navigation(direction: NavDirection) -> Self {
        Self {
            direction,
            kind: MovementKind::Navigation,
        }
    }
}

/// Discrete navigation input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    Direction(NavDirection),
    Commit,
    Cancel,
    TabNext,
    TabPrev,
}

// =============================================================================
// Events
// =============================================================================

/// Notifications a control raises; they bubble to every ancestor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavEventKind {
    /// The user committed the control's content
    Committed,
    /// The control lost focus (raised once per true to false transition)
    NavigatedOut,
    /// A button was activated
    Clicked,
    /// The control changed its own value (stepping, revert)
    ValueChanged,
}

/// An event as seen by a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEvent {
    pub kind: NavEventKind,
    /// Control that raised the event
    pub source: ControlId,
    /// Node whose listeners are running
    pub current: ControlId,
}

/// Returned by listeners to continue or stop bubbling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFlow {
    #[default]
    Continue,
    Handled,
}

// =============================================================================
// Manager state
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Unfocused,
    Focused(ControlId),
}

/// Result of handling one navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Nothing to do
    Unchanged,
    /// The focused control handled the input itself
    Consumed(ControlId),
    /// Focus moved (from `None` when entering the focused state)
    FocusMoved {
        from: Option<ControlId>,
        to: ControlId,
    },
    /// Focus was dropped
    FocusCleared { from: ControlId },
    /// The focused control received a commit
    Committed(ControlId),
}

impl NavOutcome {
    pub fn focus_changed(&self) -> bool {
        matches!(self, Self::FocusMoved { .. } | Self::FocusCleared { .. })
    }
}
