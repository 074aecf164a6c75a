//! projj-deck - clone repositories with projj and browse the projects it manages
//!
//! This is the main entry point for the projj-deck command-line interface.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use context::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::Status(args) => commands::status::run(args, &ctx).await,
        Commands::Setup(args) => commands::setup::run(args, &ctx).await,
        Commands::Clone(args) => commands::clone::run(args, &ctx).await,
        Commands::List(args) => commands::list::run(args, &ctx),
        Commands::Open(args) => commands::project::open(args, &ctx).await,
        Commands::Path(args) => commands::project::path(args, &ctx),
        Commands::Url(args) => commands::project::url(args, &ctx),
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr; stdout carries command output only.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
