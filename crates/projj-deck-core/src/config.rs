//! Reader for `~/.projj/config.json`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::paths::ManagerPaths;
use crate::types::ManagerConfig;

/// Loads the projj configuration. Read-only; never cached.
#[derive(Debug, Clone)]
pub struct ConfigReader {
    path: PathBuf,
}

impl ConfigReader {
    pub fn new(paths: &ManagerPaths) -> Self {
        Self::at(paths.config_path())
    }

    /// Read a config file at an explicit location
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, or `None` when it is missing, unreadable or malformed
    ///
    /// Callers treat `None` as "not configured".
    pub fn load(&self) -> Option<ManagerConfig> {
        match self.try_load() {
            Ok(config) => Some(config),
            Err(e) => {
                debug!("projj config unavailable: {}", e);
                None
            }
        }
    }

    /// Load the config, reporting why it could not be read
    pub fn try_load(&self) -> Result<ManagerConfig> {
        let display = self.path.display().to_string();

        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::not_configured(&display)
            } else {
                Error::config_unreadable(&display, e.to_string())
            }
        })?;

        let config: ManagerConfig = serde_json::from_str(&content)
            .map_err(|e| Error::config_unreadable(&display, e.to_string()))?;

        debug!(
            "Loaded projj config with {} base directories",
            config.base_directories.len()
        );
        Ok(config)
    }
}
