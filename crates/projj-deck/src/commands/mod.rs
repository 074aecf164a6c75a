//! Command implementations

pub mod clone;
pub mod list;
pub mod project;
pub mod setup;
pub mod status;

use anyhow::{bail, Result};
use projj_deck_manager::{EnvironmentStatus, ManagerProbe};

use crate::output;

/// Stop unless projj is installed and configured
///
/// Returns the resolved projj executable.
pub(crate) async fn require_ready(probe: &ManagerProbe) -> Result<String> {
    match probe.check_environment().await {
        EnvironmentStatus::Ready { executable } => Ok(executable),
        status => {
            report_not_ready(&status);
            bail!(status.message())
        }
    }
}

/// Print what is missing and how to fix it
pub(crate) fn report_not_ready(status: &EnvironmentStatus) {
    match status {
        EnvironmentStatus::Ready { .. } => {}
        EnvironmentStatus::NotInstalled { diagnostic } => {
            output::error(&status.message());
            if !diagnostic.is_empty() {
                eprintln!("  {}", diagnostic);
            }
        }
        EnvironmentStatus::NotConfigured { .. } => output::warning(&status.message()),
    }

    if let Some(remedy) = status.remedy() {
        output::hint(&remedy);
    }
}
