//! Runtime settings shared by all commands

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use projj_deck_core::ManagerPaths;
use projj_deck_manager::{
    default_shell, Launcher, LauncherSettings, ManagerProbe, Shell, ShellRunner,
};
use tracing::debug;

use crate::cli::Cli;

/// Resolved paths, shell and launcher settings for one invocation
pub struct Context {
    pub paths: ManagerPaths,
    shell: Arc<Shell>,
    launcher_settings: LauncherSettings,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let paths = match &cli.home {
            Some(home) => ManagerPaths::from_home(home),
            None => ManagerPaths::discover().context("Failed to determine home directory")?,
        };

        let shell_path: PathBuf = cli
            .shell
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(default_shell);

        let defaults = LauncherSettings::default();
        let launcher_settings = LauncherSettings {
            editor: cli.editor.clone().unwrap_or(defaults.editor),
            terminal: cli.terminal.clone().unwrap_or(defaults.terminal),
        };

        debug!(
            "Home {}, shell {}, editor {}, terminal {}",
            paths.home().display(),
            shell_path.display(),
            launcher_settings.editor,
            launcher_settings.terminal
        );

        Ok(Self {
            paths,
            shell: Arc::new(Shell::new(shell_path)),
            launcher_settings,
        })
    }

    pub fn shell(&self) -> Arc<dyn ShellRunner> {
        self.shell.clone()
    }

    pub fn probe(&self) -> ManagerProbe {
        ManagerProbe::new(self.shell(), self.paths.clone())
    }

    pub fn launcher(&self) -> Launcher {
        Launcher::new(self.shell(), self.launcher_settings.clone())
    }
}
