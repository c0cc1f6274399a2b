use crate::config::types::NavConfig;
use crate::error::ConfigError;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Load a config file, YAML or JSON depending on the extension
pub fn load_cfg(path: &Path) -> Result<NavConfig, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    if is_yaml(path) {
        serde_yaml::from_reader(reader).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_reader(reader).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load a config file, falling back to defaults when it is missing or broken
pub fn load_cfg_or_default(path: &Path) -> NavConfig {
    match load_cfg(path) {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            NavConfig::default()
        }
        Err(e) => {
            tracing::warn!("{e}; using default navigation config");
            NavConfig::default()
        }
    }
}

pub fn save_cfg(path: &Path, config: &NavConfig) -> Result<(), ConfigError> {
    let file = File::create(path).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    if is_yaml(path) {
        serde_yaml::to_writer(file, config).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::to_writer_pretty(file, config).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
