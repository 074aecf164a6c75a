//! Process execution through the user's shell
//!
//! Every process projj-deck starts goes through a [`ShellRunner`]. The
//! default [`Shell`] asks for an interactive shell (`-i`) so that PATH
//! entries and aliases set up in shell profiles are visible, which is where
//! npm-installed tools like projj usually live.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Shell used when `$SHELL` is not set
const FALLBACK_SHELL: &str = "/bin/zsh";

/// Resolve the user's default shell: `$SHELL`, else zsh, else `/bin/sh`
pub fn default_shell() -> PathBuf {
    if let Ok(shell) = std::env::var("SHELL") {
        if !shell.is_empty() {
            return PathBuf::from(shell);
        }
    }

    if Path::new(FALLBACK_SHELL).exists() {
        PathBuf::from(FALLBACK_SHELL)
    } else {
        PathBuf::from("/bin/sh")
    }
}

/// How the child's standard streams are wired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdioMode {
    /// Collect stdout/stderr; stdin is closed
    #[default]
    Capture,
    /// Share the terminal with the child (interactive prompts)
    Inherit,
}

/// Options for a single shell invocation
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Working directory of the shell
    pub working_directory: Option<PathBuf>,
    /// Give up after this long and kill the shell. `None` waits as long as
    /// the command runs. Output produced before a timeout is discarded: the
    /// resulting [`ProcessError`] carries only the message.
    pub timeout: Option<Duration>,
    pub stdio: StdioMode,
}

impl RunOptions {
    /// Run with the given working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: Some(dir.into()),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn inherit_stdio(mut self) -> Self {
        self.stdio = StdioMode::Inherit;
        self
    }
}

/// Captured result of a command that ran to completion
///
/// A non-zero exit is still a completed run: the streams are what callers
/// need to classify manager warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// The shell could not be spawned or did not finish in time
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{message}")]
pub struct ProcessError {
    /// Output collected before the failure, if any. Always empty for
    /// [`Shell`] timeouts and spawn failures.
    pub stdout: String,
    pub stderr: String,
    pub message: String,
}

impl ProcessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Executes command lines and scripts in a shell
#[async_trait]
pub trait ShellRunner: Send + Sync {
    /// Shell executable; also used as the shebang of generated scripts
    fn shell_path(&self) -> &Path;

    /// Run `<shell> -i -c <command_line>`
    async fn run(
        &self,
        command_line: &str,
        options: &RunOptions,
    ) -> Result<ShellOutput, ProcessError>;

    /// Run `<shell> -i <script>`
    async fn run_script(
        &self,
        script: &Path,
        options: &RunOptions,
    ) -> Result<ShellOutput, ProcessError>;
}

/// [`ShellRunner`] backed by tokio child processes
#[derive(Debug, Clone)]
pub struct Shell {
    program: PathBuf,
    interactive: bool,
    env: Vec<(OsString, OsString)>,
}

impl Shell {
    /// Interactive shell at an explicit path
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            interactive: true,
            env: Vec::new(),
        }
    }

    /// Interactive instance of the user's default shell
    pub fn user_default() -> Self {
        Self::new(default_shell())
    }

    /// Drop the `-i` flag, for environments without shell profiles
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Set an environment variable for every process this shell starts
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    async fn execute(
        &self,
        args: Vec<OsString>,
        options: &RunOptions,
    ) -> Result<ShellOutput, ProcessError> {
        let mut cmd = Command::new(&self.program);
        if self.interactive {
            cmd.arg("-i");
        }
        cmd.args(&args);

        if let Some(dir) = &options.working_directory {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        debug!(
            "Running: {} {}{:?}",
            self.program.display(),
            if self.interactive { "-i " } else { "" },
            args
        );

        match options.stdio {
            StdioMode::Capture => self.capture(cmd, options.timeout).await,
            StdioMode::Inherit => self.attach(cmd, options.timeout).await,
        }
    }

    async fn capture(
        &self,
        mut cmd: Command,
        timeout: Option<Duration>,
    ) -> Result<ShellOutput, ProcessError> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| self.timed_out(limit))?,
            None => cmd.output().await,
        }
        .map_err(|e| self.spawn_failed(e))?;

        Ok(ShellOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }

    async fn attach(
        &self,
        mut cmd: Command,
        timeout: Option<Duration>,
    ) -> Result<ShellOutput, ProcessError> {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| self.spawn_failed(e))?;
        let status = match timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait())
                .await
                .map_err(|_| self.timed_out(limit))?,
            None => child.wait().await,
        }
        .map_err(|e| self.spawn_failed(e))?;

        Ok(ShellOutput {
            exit_code: status.code(),
            ..Default::default()
        })
    }

    fn spawn_failed(&self, e: std::io::Error) -> ProcessError {
        ProcessError::new(format!(
            "Failed to run shell {}: {}",
            self.program.display(),
            e
        ))
    }

    fn timed_out(&self, limit: Duration) -> ProcessError {
        ProcessError::new(format!(
            "Shell {} did not finish within {:?}",
            self.program.display(),
            limit
        ))
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::user_default()
    }
}

#[async_trait]
impl ShellRunner for Shell {
    fn shell_path(&self) -> &Path {
        &self.program
    }

    async fn run(
        &self,
        command_line: &str,
        options: &RunOptions,
    ) -> Result<ShellOutput, ProcessError> {
        self.execute(vec!["-c".into(), command_line.into()], options)
            .await
    }

    async fn run_script(
        &self,
        script: &Path,
        options: &RunOptions,
    ) -> Result<ShellOutput, ProcessError> {
        self.execute(vec![script.as_os_str().to_owned()], options)
            .await
    }
}
