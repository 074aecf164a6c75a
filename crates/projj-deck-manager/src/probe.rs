//! Installation and configuration gate for projj
//!
//! Nothing here is cached: projj may be installed, removed or configured
//! between two checks.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use projj_deck_core::{InstallationStatus, ManagerPaths, MANAGER_NAME};
use serde::Serialize;
use tracing::{debug, info};

use crate::shell::{RunOptions, ShellRunner};

/// Command that installs projj
pub const INSTALL_COMMAND: &str = "npm install -g projj";

/// Upper bound for the `which` lookup; a broken shell profile must not hang the gate
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Combined installation and configuration state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum EnvironmentStatus {
    /// projj resolved and `~/.projj/config.json` exists
    Ready { executable: String },
    /// projj could not be resolved from the shell
    NotInstalled { diagnostic: String },
    /// projj is installed but has never been initialized
    NotConfigured { config_path: String },
}

impl EnvironmentStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Short description of the state
    pub fn message(&self) -> String {
        match self {
            Self::Ready { executable } => format!("projj found at {}", executable),
            Self::NotInstalled { .. } => "projj is not installed or not found in PATH".to_string(),
            Self::NotConfigured { config_path } => {
                format!("projj is not configured ({} is missing)", config_path)
            }
        }
    }

    /// What the user should do next, if anything
    pub fn remedy(&self) -> Option<String> {
        match self {
            Self::Ready { .. } => None,
            Self::NotInstalled { .. } => Some(format!("Install projj with '{}'", INSTALL_COMMAND)),
            Self::NotConfigured { .. } => Some(format!("Run '{} init' first", MANAGER_NAME)),
        }
    }
}

/// Answers whether projj is installed and configured
#[derive(Clone)]
pub struct ManagerProbe {
    shell: Arc<dyn ShellRunner>,
    paths: ManagerPaths,
    manager: String,
}

impl ManagerProbe {
    pub fn new(shell: Arc<dyn ShellRunner>, paths: ManagerPaths) -> Self {
        Self {
            shell,
            paths,
            manager: MANAGER_NAME.to_string(),
        }
    }

    /// Probe for a differently named executable
    pub fn with_manager_name(mut self, name: impl Into<String>) -> Self {
        self.manager = name.into();
        self
    }

    pub fn manager_name(&self) -> &str {
        &self.manager
    }

    /// Resolve projj through the user's interactive shell
    ///
    /// Installed means `which` printed a path that exists on disk. When the
    /// shell resolves nothing, the current process PATH is searched as well.
    pub async fn check_installed(&self) -> InstallationStatus {
        let command_line = format!("which {}", self.manager);
        let options = RunOptions::default().with_timeout(PROBE_TIMEOUT);

        match self.shell.run(&command_line, &options).await {
            Ok(output) => {
                if let Some(path) = resolved_path(&output.stdout) {
                    info!("Found {} at {}", self.manager, path);
                    return InstallationStatus::found(path);
                }
                debug!(
                    "Shell did not resolve {} (exit {:?}): {}",
                    self.manager,
                    output.exit_code,
                    output.stderr.trim()
                );
            }
            Err(e) => debug!("Shell lookup for {} failed: {}", self.manager, e),
        }

        if let Ok(path) = which::which(&self.manager) {
            let path = path.display().to_string();
            info!("Found {} on process PATH at {}", self.manager, path);
            return InstallationStatus::found(path);
        }

        InstallationStatus::missing(format!(
            "{} not found. Please install {} using '{}'",
            self.manager, self.manager, INSTALL_COMMAND
        ))
    }

    /// Whether `~/.projj/config.json` exists; the file is not parsed
    pub fn check_configured(&self) -> bool {
        self.paths.config_path().exists()
    }

    /// Both gates, installation first
    pub async fn check_environment(&self) -> EnvironmentStatus {
        let installation = self.check_installed().await;

        match installation.executable_path {
            Some(executable) if installation.installed => {
                if self.check_configured() {
                    EnvironmentStatus::Ready { executable }
                } else {
                    EnvironmentStatus::NotConfigured {
                        config_path: self.paths.config_path().display().to_string(),
                    }
                }
            }
            _ => EnvironmentStatus::NotInstalled {
                diagnostic: installation.diagnostic.unwrap_or_default(),
            },
        }
    }
}

/// Last non-empty stdout line, if it names an existing file
///
/// Interactive shells may print profile banners before the answer.
fn resolved_path(stdout: &str) -> Option<String> {
    let candidate = stdout.lines().map(str::trim).rfind(|line| !line.is_empty())?;

    if Path::new(candidate).exists() {
        Some(candidate.to_string())
    } else {
        None
    }
}
