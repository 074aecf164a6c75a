//! Error types for projj-deck-core

use thiserror::Error;

/// Result type alias using projj-deck-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while locating or reading projj state
#[derive(Error, Debug)]
pub enum Error {
    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// projj config file does not exist
    #[error("projj is not configured: {path} does not exist. Run 'projj init' first")]
    NotConfigured { path: String },

    /// projj config file exists but could not be read or parsed
    #[error("Could not read projj config at {path}: {reason}")]
    ConfigUnreadable { path: String, reason: String },

    /// projj cache file is missing or could not be read or parsed
    #[error("Could not read projj cache at {path}: {reason}")]
    CacheUnreadable { path: String, reason: String },
}

impl Error {
    /// Create a not configured error
    pub fn not_configured(path: impl Into<String>) -> Self {
        Self::NotConfigured { path: path.into() }
    }

    /// Create a config unreadable error
    pub fn config_unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a cache unreadable error
    pub fn cache_unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CacheUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
