//! Opening projects in external applications
//!
//! Launches are fire-and-forget: nothing the application prints is read.

use std::fmt;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::shell::{RunOptions, ShellRunner};

/// Where a project can be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Application {
    Editor,
    Terminal,
    FileBrowser,
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editor => write!(f, "editor"),
            Self::Terminal => write!(f, "terminal"),
            Self::FileBrowser => write!(f, "file browser"),
        }
    }
}

/// Which applications to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    /// Editor command, run through the shell as `<editor> <path>`
    pub editor: String,
    /// Terminal application name (macOS) or executable
    pub terminal: String,
}

impl LauncherSettings {
    pub fn default_editor() -> &'static str {
        "code"
    }

    pub fn default_terminal() -> &'static str {
        if cfg!(target_os = "macos") {
            "Warp"
        } else {
            "x-terminal-emulator"
        }
    }
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            editor: Self::default_editor().to_string(),
            terminal: Self::default_terminal().to_string(),
        }
    }
}

/// Opens directories in the configured applications
pub struct Launcher {
    shell: Arc<dyn ShellRunner>,
    settings: LauncherSettings,
}

impl Launcher {
    pub fn new(shell: Arc<dyn ShellRunner>, settings: LauncherSettings) -> Self {
        Self { shell, settings }
    }

    pub fn settings(&self) -> &LauncherSettings {
        &self.settings
    }

    pub async fn open(&self, application: Application, path: &str) -> Result<()> {
        info!("Opening {} in {}", path, application);
        match application {
            Application::Editor => self.open_in_editor(path).await,
            Application::Terminal => self.open_in_terminal(path),
            Application::FileBrowser => open_in_file_browser(path),
        }
    }

    /// The editor CLI (`code`, `cursor`) usually lives on a profile PATH
    async fn open_in_editor(&self, path: &str) -> Result<()> {
        let command_line = format!("{} {}", self.settings.editor, shell_words::quote(path));
        let output = self
            .shell
            .run(&command_line, &RunOptions::default())
            .await
            .map_err(|e| Error::launch_failed(&self.settings.editor, e.message))?;

        if output.success() {
            Ok(())
        } else {
            Err(Error::launch_failed(
                &self.settings.editor,
                format!(
                    "make sure {} is installed ({})",
                    self.settings.editor,
                    output.stderr.trim()
                ),
            ))
        }
    }

    fn open_in_terminal(&self, path: &str) -> Result<()> {
        let mut cmd = if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.args(["-a", self.settings.terminal.as_str(), path]);
            cmd
        } else {
            let mut cmd = Command::new(&self.settings.terminal);
            cmd.current_dir(path);
            cmd
        };
        spawn_detached(&mut cmd, &self.settings.terminal)
    }
}

/// `open` on macOS, `explorer` on Windows, `xdg-open` elsewhere
fn file_browser_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

fn open_in_file_browser(path: &str) -> Result<()> {
    let program = file_browser_command();
    let mut cmd = Command::new(program);
    cmd.arg(path);
    spawn_detached(&mut cmd, program)
}

fn spawn_detached(cmd: &mut Command, application: &str) -> Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let child = cmd
        .spawn()
        .map_err(|e| Error::launch_failed(application, e.to_string()))?;
    debug!("Started {} (pid {:?})", application, child.id());
    Ok(())
}
