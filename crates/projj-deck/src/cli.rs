//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use projj_deck_manager::Application;

/// projj-deck - clone repositories with projj and browse your projects
#[derive(Parser, Debug)]
#[command(name = "projj-deck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Home directory containing .projj
    #[arg(long, global = true, env = "PROJJ_DECK_HOME")]
    pub home: Option<PathBuf>,

    /// Shell used to run projj (defaults to $SHELL)
    #[arg(long, global = true)]
    pub shell: Option<PathBuf>,

    /// Editor command used to open projects
    #[arg(long, global = true, env = "PROJJ_DECK_EDITOR")]
    pub editor: Option<String>,

    /// Terminal application used to open projects
    #[arg(long, global = true, env = "PROJJ_DECK_TERMINAL")]
    pub terminal: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that projj is installed and configured
    Status(StatusArgs),

    /// Install or initialize projj
    Setup(SetupArgs),

    /// Clone a repository into a projj base directory
    Clone(CloneArgs),

    /// List projects from the projj cache
    List(ListArgs),

    /// Open a project in an editor, terminal or file browser
    Open(OpenArgs),

    /// Print the location of a project
    Path(ProjectArgs),

    /// Print the origin URL of a project
    Url(ProjectArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("action").required(true).args(["install", "init"])))]
pub struct SetupArgs {
    /// Install projj with npm
    #[arg(long)]
    pub install: bool,

    /// Run 'projj init'
    #[arg(long)]
    pub init: bool,
}

#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Git URL to clone
    pub url: String,

    /// Base directory to clone into (prompted when omitted)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Open the cloned project afterwards
    #[arg(long, value_enum)]
    pub open: Option<OpenWith>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show projects in cache order instead of newest first
    #[arg(long)]
    pub oldest_first: bool,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Project name, directory name or location
    pub project: String,

    /// Application to open the project with
    #[arg(short, long, value_enum, default_value_t = OpenWith::Editor)]
    pub with: OpenWith,
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project name, directory name or location
    pub project: String,
}

/// Application choices exposed on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenWith {
    Editor,
    Terminal,
    Files,
}

impl From<OpenWith> for Application {
    fn from(value: OpenWith) -> Self {
        match value {
            OpenWith::Editor => Application::Editor,
            OpenWith::Terminal => Application::Terminal,
            OpenWith::Files => Application::FileBrowser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_setup_requires_an_action() {
        assert!(Cli::try_parse_from(["projj-deck", "setup"]).is_err());
        assert!(Cli::try_parse_from(["projj-deck", "setup", "--install", "--init"]).is_err());
        assert!(Cli::try_parse_from(["projj-deck", "setup", "--init"]).is_ok());
    }

    #[test]
    fn test_clone_args() {
        let cli = Cli::try_parse_from([
            "projj-deck",
            "clone",
            "git@github.com:foo/bar.git",
            "--base",
            "/code",
            "--open",
            "files",
        ])
        .unwrap();

        match cli.command {
            Commands::Clone(args) => {
                assert_eq!(args.url, "git@github.com:foo/bar.git");
                assert_eq!(args.base.as_deref(), Some("/code"));
                assert_eq!(args.open, Some(OpenWith::Files));
            }
            other => panic!("expected clone, got {:?}", other),
        }
    }

    #[test]
    fn test_open_defaults_to_editor() {
        let cli = Cli::try_parse_from(["projj-deck", "open", "bar"]).unwrap();
        match cli.command {
            Commands::Open(args) => {
                assert_eq!(Application::from(args.with), Application::Editor)
            }
            other => panic!("expected open, got {:?}", other),
        }
    }
}
