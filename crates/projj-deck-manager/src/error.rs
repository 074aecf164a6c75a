//! Error types for projj-deck-manager

use thiserror::Error;

use crate::shell::ProcessError;

/// Result type alias using projj-deck-manager's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Conditions that stop a manager operation outright
///
/// Anything the manager itself reports about a clone is a
/// [`CloneOutcome`](crate::CloneOutcome), not an error.
#[derive(Error, Debug)]
pub enum Error {
    /// projj could not be resolved from the user's shell
    #[error("projj is not installed: {diagnostic}")]
    NotInstalled { diagnostic: String },

    /// Shell could not be spawned, timed out, or the command exited non-zero
    #[error("Process execution failed: {0}")]
    Process(#[from] ProcessError),

    /// Clone requested without a URL
    #[error("Git URL must not be empty")]
    BlankGitUrl,

    /// Chosen base directory is not in the loaded projj config
    #[error("Base directory not found in projj config: {directory}")]
    BaseDirectoryNotConfigured { directory: String },

    /// The one-shot clone script could not be written
    #[error("Failed to write clone script {path}: {source}")]
    ScriptWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// projj reported a failure on stderr
    #[error("Clone failed: {message}")]
    CloneFailed { message: String },

    /// External application could not be started
    #[error("Failed to open {application}: {reason}")]
    LaunchFailed { application: String, reason: String },
}

impl Error {
    /// Create a not installed error
    pub fn not_installed(diagnostic: impl Into<String>) -> Self {
        Self::NotInstalled {
            diagnostic: diagnostic.into(),
        }
    }

    /// Create a base directory not configured error
    pub fn base_directory_not_configured(directory: impl Into<String>) -> Self {
        Self::BaseDirectoryNotConfigured {
            directory: directory.into(),
        }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create a launch failed error
    pub fn launch_failed(application: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LaunchFailed {
            application: application.into(),
            reason: reason.into(),
        }
    }
}
