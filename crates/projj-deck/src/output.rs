//! Terminal output for projj-deck
//!
//! Outcome lines go to stdout so `projj-deck clone ... | tee` keeps them;
//! warnings, errors and hints go to stderr next to the log output.

use std::future::Future;
use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Success,
    Info,
    Warning,
    Error,
    /// Suggested next step, indented under the previous line
    Hint,
}

impl Mark {
    fn symbol(self) -> StyledObject<&'static str> {
        match self {
            Self::Success => style("✓").green().bold(),
            Self::Info => style("ℹ").blue().bold(),
            Self::Warning => style("⚠").yellow().bold(),
            Self::Error => style("✗").red().bold(),
            Self::Hint => style("→").cyan(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error | Self::Hint)
    }

    fn render(self, msg: &str) -> String {
        match self {
            Self::Hint => format!("  {} {}", self.symbol(), style(msg).dim()),
            _ => format!("{} {}", self.symbol(), msg),
        }
    }
}

/// Print one status line on the stream its mark belongs to
pub fn line(mark: Mark, msg: &str) {
    let rendered = mark.render(msg);
    if mark.to_stderr() {
        eprintln!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
}

pub fn success(msg: &str) {
    line(Mark::Success, msg);
}

pub fn info(msg: &str) {
    line(Mark::Info, msg);
}

pub fn warning(msg: &str) {
    line(Mark::Warning, msg);
}

pub fn error(msg: &str) {
    line(Mark::Error, msg);
}

pub fn hint(msg: &str) {
    line(Mark::Hint, msg);
}

/// Section title
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Indented `key: value` detail line
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Await `task` behind a spinner that is cleared once it finishes
///
/// projj and npm print nothing while they work, so long waits need a sign
/// of life.
pub async fn with_spinner<F: Future>(msg: &str, task: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = task.await;
    pb.finish_and_clear();
    result
}
