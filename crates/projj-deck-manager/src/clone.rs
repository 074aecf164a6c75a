//! Repository cloning through `projj add`
//!
//! projj asks which base directory to clone into with a numbered menu. The
//! orchestrator answers that prompt by piping the menu number into
//! `projj add <url>` from a one-shot script, runs the script in the user's
//! interactive shell, removes it, and classifies what projj printed.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use projj_deck_core::{ManagerConfig, ManagerPaths};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::OutputClassifier;
use crate::error::{Error, Result};
use crate::probe::ManagerProbe;
use crate::shell::{RunOptions, ShellRunner};

/// A project projj reported cloning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClonedProject {
    pub path: String,
    /// Final segment of the path
    pub name: String,
}

impl ClonedProject {
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown Project")
            .to_string();
        Self { path, name }
    }
}

/// Result of one clone attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CloneOutcome {
    /// projj finished. `project` is known only when projj logged where it
    /// cloned to. `ambiguous` is set when projj printed neither a success
    /// marker nor an error and the clone is assumed to have worked.
    Success {
        project: Option<ClonedProject>,
        ambiguous: bool,
    },
    /// projj reported an error; `message` is its stderr
    Failure { message: String },
}

impl CloneOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Success { ambiguous: true, .. })
    }

    pub fn project(&self) -> Option<&ClonedProject> {
        match self {
            Self::Success { project, .. } => project.as_ref(),
            Self::Failure { .. } => None,
        }
    }

    pub fn project_path(&self) -> Option<&str> {
        self.project().map(|p| p.path.as_str())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project().map(|p| p.name.as_str())
    }

    /// Convert a failure into [`Error::CloneFailed`] carrying trimmed stderr
    pub fn into_result(self) -> Result<Option<ClonedProject>> {
        match self {
            Self::Success { project, .. } => Ok(project),
            Self::Failure { message } => Err(Error::clone_failed(message.trim())),
        }
    }
}

/// Render the one-shot clone script
///
/// ```text
/// #!<shell>
/// echo "<index>" | <projj> add <url>
/// ```
///
/// The projj path and the URL are shell-quoted. `npx`-style invocations are
/// left as written so they still split into words.
pub fn render_clone_script(shell: &Path, manager: &str, index: usize, git_url: &str) -> String {
    let manager_command = if manager.contains("npx") {
        manager.to_string()
    } else {
        shell_words::quote(manager).into_owned()
    };

    format!(
        "#!{}\necho \"{}\" | {} add {}\n",
        shell.display(),
        index,
        manager_command,
        shell_words::quote(git_url)
    )
}

/// Executable script file that is removed when dropped
struct ScratchScript {
    path: PathBuf,
}

impl ScratchScript {
    fn write(path: PathBuf, content: &str) -> Result<Self> {
        let script_error = |source| Error::ScriptWrite {
            path: path.display().to_string(),
            source,
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o755);
        }

        let mut file = options.open(&path).map_err(script_error)?;
        // Guard exists from here on so a failed write is cleaned up too
        let script = Self { path };
        file.write_all(content.as_bytes())
            .map_err(|e| Error::ScriptWrite {
                path: script.path.display().to_string(),
                source: e,
            })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // A leftover file keeps its old mode on open; force it
            fs::set_permissions(&script.path, fs::Permissions::from_mode(0o755)).map_err(
                |e| Error::ScriptWrite {
                    path: script.path.display().to_string(),
                    source: e,
                },
            )?;
        }

        Ok(script)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchScript {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed clone script {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Clone script {} already removed", self.path.display())
            }
            Err(e) => warn!(
                "Failed to remove clone script {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Clones repositories by driving `projj add`
///
/// The script path is fixed per user, so clones must not overlap.
pub struct CloneOrchestrator {
    shell: Arc<dyn ShellRunner>,
    probe: ManagerProbe,
    paths: ManagerPaths,
    classifier: OutputClassifier,
}

impl CloneOrchestrator {
    pub fn new(shell: Arc<dyn ShellRunner>, paths: ManagerPaths) -> Self {
        let probe = ManagerProbe::new(shell.clone(), paths.clone());
        Self::with_probe(shell, paths, probe)
    }

    /// Use a preconfigured probe
    pub fn with_probe(shell: Arc<dyn ShellRunner>, paths: ManagerPaths, probe: ManagerProbe) -> Self {
        Self {
            shell,
            probe,
            paths,
            classifier: OutputClassifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: OutputClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Clone `git_url` into `base_directory`
    ///
    /// `base_directory` must be one of `config.base_directories`; its
    /// position is the number sent to projj's prompt.
    ///
    /// # Errors
    /// Returns error if:
    /// - the URL is blank
    /// - the base directory is not in the config
    /// - projj can no longer be resolved
    /// - the clone script cannot be written
    ///
    /// Whatever projj itself reports is returned as a [`CloneOutcome`].
    pub async fn clone(
        &self,
        git_url: &str,
        base_directory: &str,
        config: &ManagerConfig,
    ) -> Result<CloneOutcome> {
        let git_url = git_url.trim();
        if git_url.is_empty() {
            return Err(Error::BlankGitUrl);
        }

        let index = config
            .base_index(base_directory)
            .ok_or_else(|| Error::base_directory_not_configured(base_directory))?;

        let installation = self.probe.check_installed().await;
        let manager = match installation.executable_path {
            Some(path) if installation.installed => path,
            _ => {
                return Err(Error::not_installed(installation.diagnostic.unwrap_or_else(
                    || "projj not found. Please install projj first.".to_string(),
                )))
            }
        };

        info!(
            "Cloning {} into {} (menu entry {})",
            git_url, base_directory, index
        );

        let content = render_clone_script(self.shell.shell_path(), &manager, index, git_url);
        let script = ScratchScript::write(self.paths.clone_script_path(), &content)?;

        let result = self
            .shell
            .run_script(script.path(), &RunOptions::in_dir(self.paths.home()))
            .await;

        drop(script);

        let (stdout, stderr) = match result {
            Ok(output) => {
                debug!("projj add exited with {:?}", output.exit_code);
                (output.stdout, output.stderr)
            }
            Err(e) => {
                warn!("projj add did not complete: {}", e);
                let stderr = if e.stderr.trim().is_empty() {
                    e.message
                } else {
                    e.stderr
                };
                (e.stdout, stderr)
            }
        };

        let outcome = self.classifier.classify(&stdout, &stderr);
        match &outcome {
            CloneOutcome::Success {
                project: Some(project),
                ..
            } => info!("Cloned {} to {}", project.name, project.path),
            CloneOutcome::Success { ambiguous, .. } => {
                info!("Clone finished without a reported path (ambiguous: {})", ambiguous)
            }
            CloneOutcome::Failure { message } => warn!("Clone failed: {}", message.trim()),
        }

        Ok(outcome)
    }
}
