use std::path::PathBuf;

use crate::ui::focus::types::{ControlId, RootId};

/// Errors raised by the navigation layer.
///
/// Everything except `UnknownControl` and `NotNavigable` is a programming error: those panic in
/// debug builds and are only returned as values in release builds.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("a navigation manager is already registered for {0}")]
    DuplicateRegistration(RootId),
    #[error("{0} is not ready for navigation yet")]
    NotReady(RootId),
    #[error("no navigation manager is registered for {0}")]
    NotRegistered(RootId),
    #[error("the navigation manager for {manager} was handed {tree}")]
    TreeMismatch { manager: RootId, tree: RootId },
    #[error("control {0} does not exist in this tree")]
    UnknownControl(ControlId),
    #[error("control {0} cannot receive focus")]
    NotNavigable(ControlId),
}

impl NavError {
    /// Whether this error signals a host wiring bug rather than a runtime condition.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRegistration(_)
                | Self::NotReady(_)
                | Self::NotRegistered(_)
                | Self::TreeMismatch { .. }
        )
    }
}

/// Report a programming error: loud in debug builds, returned in release builds.
pub(crate) fn programming_error(err: NavError) -> NavError {
    tracing::error!("{err}");
    if cfg!(debug_assertions) {
        panic!("{err}");
    }
    err
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to parse YAML config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(String),
}
