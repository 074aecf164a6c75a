//! First-time setup actions, delegated to npm and projj unchanged

use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::probe::{ManagerProbe, INSTALL_COMMAND};
use crate::shell::{ProcessError, RunOptions, ShellOutput, ShellRunner};

/// Installs and initializes projj
pub struct ManagerSetup {
    shell: Arc<dyn ShellRunner>,
    probe: ManagerProbe,
}

impl ManagerSetup {
    pub fn new(shell: Arc<dyn ShellRunner>, probe: ManagerProbe) -> Self {
        Self { shell, probe }
    }

    /// Run `npm install -g projj` in the user's shell
    pub async fn install(&self) -> Result<()> {
        info!("Installing projj: {}", INSTALL_COMMAND);
        let output = self
            .shell
            .run(INSTALL_COMMAND, &RunOptions::default())
            .await?;
        check_exit(INSTALL_COMMAND, output)
    }

    /// Run `projj init`, letting projj prompt on the terminal
    pub async fn init(&self) -> Result<()> {
        let installation = self.probe.check_installed().await;
        let executable = match installation.executable_path {
            Some(path) if installation.installed => path,
            _ => {
                return Err(Error::not_installed(
                    installation.diagnostic.unwrap_or_default(),
                ))
            }
        };

        let command_line = format!("{} init", shell_words::quote(&executable));
        info!("Initializing projj: {}", command_line);

        let output = self
            .shell
            .run(&command_line, &RunOptions::default().inherit_stdio())
            .await?;
        check_exit(&command_line, output)
    }
}

fn check_exit(command_line: &str, output: ShellOutput) -> Result<()> {
    if output.success() {
        return Ok(());
    }

    let detail = if output.stderr.trim().is_empty() {
        format!("'{}' exited with {:?}", command_line, output.exit_code)
    } else {
        output.stderr.trim().to_string()
    };

    Err(Error::Process(ProcessError {
        stdout: output.stdout,
        stderr: output.stderr,
        message: detail,
    }))
}
