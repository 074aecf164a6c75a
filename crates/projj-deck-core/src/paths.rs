//! Locations of projj state and of the transient clone script

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the manager executable
pub const MANAGER_NAME: &str = "projj";

/// File name of the one-shot clone script, written directly under the home directory
pub const CLONE_SCRIPT_NAME: &str = ".raycast_projj_clone.sh";

/// Get the user's home directory
///
/// The HOME environment variable wins over `dirs::home_dir()` so that the
/// scratch script and the manager's state resolve to the same place the
/// user's shell sees.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir().ok_or(Error::HomeDirNotFound)
}

/// Resolved paths for one home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerPaths {
    home: PathBuf,
    manager_dir: PathBuf,
}

impl ManagerPaths {
    /// Resolve paths for the current user
    pub fn discover() -> Result<Self> {
        Ok(Self::from_home(get_home_dir()?))
    }

    /// Resolve paths relative to an explicit home directory
    pub fn from_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let manager_dir = home.join(format!(".{}", MANAGER_NAME));
        Self { home, manager_dir }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `~/.projj`
    pub fn manager_dir(&self) -> &Path {
        &self.manager_dir
    }

    /// `~/.projj/config.json`
    pub fn config_path(&self) -> PathBuf {
        self.manager_dir.join("config.json")
    }

    /// `~/.projj/cache.json`
    pub fn cache_path(&self) -> PathBuf {
        self.manager_dir.join("cache.json")
    }

    /// `~/.raycast_projj_clone.sh`
    ///
    /// The name is fixed, so at most one clone may be in flight per user.
    pub fn clone_script_path(&self) -> PathBuf {
        self.home.join(CLONE_SCRIPT_NAME)
    }
}
