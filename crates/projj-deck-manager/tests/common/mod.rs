//! Common test helpers for projj-deck-manager integration tests
//!
//! Provides:
//! - a recording [`ShellRunner`] that answers without spawning processes
//! - mock executables written as `/bin/sh` scripts
//! - fake home directories with a projj config

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use projj_deck_core::{ManagerConfig, ManagerPaths};
use projj_deck_manager::{ProcessError, RunOptions, ShellOutput, ShellRunner};
use tempfile::TempDir;

// ─── Recording Shell ──────────────────────────────────────────────────────────

/// Script handed to `run_script`, captured while it still existed
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ScriptRun {
    pub path: PathBuf,
    pub content: String,
    pub mode: u32,
    pub working_directory: Option<PathBuf>,
}

/// [`ShellRunner`] that answers `which` with a fixed path and returns a
/// canned result for scripts.
#[allow(dead_code)]
pub struct RecordingShell {
    shell_path: PathBuf,
    which_stdout: String,
    script_result: Result<ShellOutput, ProcessError>,
    pub commands: Arc<Mutex<Vec<String>>>,
    pub scripts: Arc<Mutex<Vec<ScriptRun>>>,
}

#[allow(dead_code)]
impl RecordingShell {
    pub fn new(which_stdout: impl Into<String>) -> Self {
        Self {
            shell_path: PathBuf::from("/bin/zsh"),
            which_stdout: which_stdout.into(),
            script_result: Ok(ShellOutput {
                exit_code: Some(0),
                ..Default::default()
            }),
            commands: Arc::new(Mutex::new(Vec::new())),
            scripts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Streams the script run produces
    pub fn script_output(mut self, stdout: &str, stderr: &str) -> Self {
        self.script_result = Ok(ShellOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: Some(if stderr.is_empty() { 0 } else { 1 }),
        });
        self
    }

    /// Make the script run fail as if the shell could not be spawned
    pub fn script_error(mut self, error: ProcessError) -> Self {
        self.script_result = Err(error);
        self
    }

    pub fn script_runs(&self) -> Vec<ScriptRun> {
        self.scripts.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShellRunner for RecordingShell {
    fn shell_path(&self) -> &Path {
        &self.shell_path
    }

    async fn run(
        &self,
        command_line: &str,
        _options: &RunOptions,
    ) -> Result<ShellOutput, ProcessError> {
        self.commands.lock().unwrap().push(command_line.to_string());

        if command_line.starts_with("which ") && !self.which_stdout.is_empty() {
            return Ok(ShellOutput {
                stdout: format!("{}\n", self.which_stdout),
                stderr: String::new(),
                exit_code: Some(0),
            });
        }

        Ok(ShellOutput {
            stdout: String::new(),
            stderr: format!("{}: not found\n", command_line),
            exit_code: Some(1),
        })
    }

    async fn run_script(
        &self,
        script: &Path,
        options: &RunOptions,
    ) -> Result<ShellOutput, ProcessError> {
        let content = fs::read_to_string(script).expect("script exists while running");
        let mode = script_mode(script);

        self.scripts.lock().unwrap().push(ScriptRun {
            path: script.to_path_buf(),
            content,
            mode,
            working_directory: options.working_directory.clone(),
        });

        self.script_result.clone()
    }
}

#[cfg(unix)]
fn script_mode(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).unwrap().permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn script_mode(_path: &Path) -> u32 {
    0o755
}

// ─── Mock Executables ────────────────────────────────────────────────────────

/// Write an executable `/bin/sh` script named `name` into `dir`
pub fn create_mock_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write mock");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod mock");
    }

    path
}

// ─── Fake Home ───────────────────────────────────────────────────────────────

/// Temporary home with a `.projj/config.json`
#[allow(dead_code)]
pub struct FakeHome {
    pub dir: TempDir,
    pub paths: ManagerPaths,
    pub config: ManagerConfig,
}

#[allow(dead_code)]
impl FakeHome {
    pub fn with_bases(bases: &[&str]) -> Self {
        let dir = TempDir::new().expect("create temp home");
        let paths = ManagerPaths::from_home(dir.path());
        fs::create_dir_all(paths.manager_dir()).expect("create .projj");

        let json = serde_json::json!({ "base": bases, "alias": {}, "hooks": {} });
        fs::write(paths.config_path(), json.to_string()).expect("write config");
        let config = serde_json::from_value(json).expect("config parses");

        Self { dir, paths, config }
    }

    /// Directory for mock executables, outside `.projj`
    pub fn bin_dir(&self) -> PathBuf {
        let bin = self.dir.path().join("bin");
        fs::create_dir_all(&bin).expect("create bin dir");
        bin
    }
}
