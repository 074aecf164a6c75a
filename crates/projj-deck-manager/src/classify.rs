//! Classification of projj's `add` output
//!
//! projj has no machine-readable result: it prints human-oriented log lines.
//! Success is recognized by literal markers in stdout. The marker list is
//! kept here, in one place, so it can follow projj releases without touching
//! the orchestration code. A marker that disappears in a future release
//! degrades to the ambiguous path below, never to a panic.
//!
//! Decision order:
//! 1. a marker in stdout: success, with the `Cloning into <path>` line if any
//! 2. otherwise stderr with real content: failure carrying stderr verbatim
//! 3. otherwise (silence, or only git's `Cloning into` progress on stderr):
//!    success without a path, flagged ambiguous

use std::sync::LazyLock;

use regex::Regex;

use crate::clone::{CloneOutcome, ClonedProject};

/// Markers projj prints when an add went through: the check mark (with or
/// without a text variation selector), its `Done` line, and the line it
/// logs before cloning.
pub const DEFAULT_SUCCESS_MARKERS: &[&str] = &["\u{2714}", "Done", "Start adding repository"];

/// Progress line git and projj print while cloning; not an error on stderr
const CLONING_PROGRESS: &str = "Cloning into";

static CLONING_INTO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Cloning into (.+?)$").expect("cloning-into regex is valid")
});

/// Turns captured projj output into a [`CloneOutcome`]
#[derive(Debug, Clone)]
pub struct OutputClassifier {
    markers: Vec<String>,
}

impl OutputClassifier {
    /// Classifier with a custom marker list
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether stdout contains any success marker
    pub fn is_success(&self, stdout: &str) -> bool {
        !stdout.is_empty() && self.markers.iter().any(|m| stdout.contains(m.as_str()))
    }

    pub fn classify(&self, stdout: &str, stderr: &str) -> CloneOutcome {
        if self.is_success(stdout) {
            return CloneOutcome::Success {
                project: extract_cloned_path(stdout).map(ClonedProject::from_path),
                ambiguous: false,
            };
        }

        if !stderr.trim().is_empty() && !stderr.contains(CLONING_PROGRESS) {
            return CloneOutcome::Failure {
                message: stderr.to_string(),
            };
        }

        CloneOutcome::Success {
            project: None,
            ambiguous: true,
        }
    }
}

impl Default for OutputClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_MARKERS.iter().copied())
    }
}

/// Path from the first `Cloning into <path>` line that starts a line
///
/// Quotes and a trailing `...` (git's progress format) are removed.
pub fn extract_cloned_path(stdout: &str) -> Option<String> {
    let raw = CLONING_INTO_RE.captures(stdout)?.get(1)?.as_str();

    let path = raw
        .trim()
        .trim_end_matches("...")
        .trim_matches(|c| c == '\'' || c == '"')
        .trim();

    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}
