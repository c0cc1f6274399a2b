//! Logging setup.
//!
//! Installs a global `tracing` subscriber writing to stderr. `RUST_LOG` takes
//! precedence over the configured level when it is set.

use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

/// Install the global subscriber using `default_filter` unless `RUST_LOG` is set.
pub fn init_logging(default_filter: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|source| LoggingError::Filter {
            filter: default_filter.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoggingError::SetGlobal(err.to_string()))?;

    tracing::debug!(filter = default_filter, "logging initialized");
    Ok(())
}
