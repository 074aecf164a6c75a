//! # projj-deck-manager
//!
//! Drives the `projj` executable on behalf of projj-deck:
//! - [`Shell`] runs command lines in the user's interactive shell so that
//!   profile PATH and alias customizations apply
//! - [`ManagerProbe`] answers "is projj installed" and "is projj configured"
//! - [`CloneOrchestrator`] feeds projj's interactive `add` prompt from a
//!   one-shot script and classifies what projj printed
//! - [`Launcher`] opens projects in an editor, terminal or file browser
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use projj_deck_core::{ConfigReader, ManagerPaths};
//! use projj_deck_manager::{CloneOrchestrator, Shell};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = ManagerPaths::discover()?;
//! let config = ConfigReader::new(&paths).load().ok_or("projj is not configured")?;
//! let orchestrator = CloneOrchestrator::new(Arc::new(Shell::user_default()), paths);
//!
//! let base = &config.base_directories[0];
//! let outcome = orchestrator
//!     .clone("https://github.com/user/repo.git", base, &config)
//!     .await?;
//! println!("{:?}", outcome.project_path());
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod clone;
pub mod error;
pub mod launch;
pub mod probe;
pub mod setup;
pub mod shell;

pub use classify::{extract_cloned_path, OutputClassifier, DEFAULT_SUCCESS_MARKERS};
pub use clone::{render_clone_script, CloneOrchestrator, CloneOutcome, ClonedProject};
pub use error::{Error, Result};
pub use launch::{Application, Launcher, LauncherSettings};
pub use probe::{EnvironmentStatus, ManagerProbe, INSTALL_COMMAND};
pub use setup::ManagerSetup;
pub use shell::{
    default_shell, ProcessError, RunOptions, Shell, ShellOutput, ShellRunner, StdioMode,
};
