//! Status command - report whether projj is ready to use

use anyhow::Result;
use owo_colors::OwoColorize;
use projj_deck_core::{CacheReader, ConfigReader};
use projj_deck_manager::EnvironmentStatus;
use serde::Serialize;

use crate::cli::StatusArgs;
use crate::commands::report_not_ready;
use crate::context::Context;
use crate::output;

/// Machine-readable status
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    #[serde(flatten)]
    environment: EnvironmentStatus,
    base_directories: Vec<String>,
    /// `None` when the cache could not be read
    project_count: Option<usize>,
}

pub async fn run(args: StatusArgs, ctx: &Context) -> Result<()> {
    let probe = ctx.probe();

    let environment = if args.json {
        probe.check_environment().await
    } else {
        output::with_spinner("Checking projj installation...", probe.check_environment()).await
    };

    let config = ConfigReader::new(&ctx.paths).try_load();
    let cache = CacheReader::new(&ctx.paths).try_load();

    if args.json {
        let report = StatusReport {
            environment,
            base_directories: config
                .map(|c| c.base_directories)
                .unwrap_or_default(),
            project_count: cache.ok().map(|projects| projects.len()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::header("projj");
    match &environment {
        EnvironmentStatus::Ready { executable } => {
            output::success("projj is installed and configured");
            output::kv("Executable", executable);
        }
        status => {
            report_not_ready(status);
            return Ok(());
        }
    }

    output::kv("Config", &ctx.paths.config_path().display().to_string());
    match config {
        Ok(config) if config.has_base_directories() => {
            output::header("Base directories");
            for (index, dir) in config.base_directories.iter().enumerate() {
                println!("  {} {}", format!("{}.", index + 1).dimmed(), dir);
            }
        }
        Ok(_) => output::warning("No base directories configured"),
        Err(e) => output::warning(&e.to_string()),
    }

    println!();
    match cache {
        Ok(projects) => output::kv("Projects", &projects.len().to_string()),
        Err(e) => output::warning(&e.to_string()),
    }

    Ok(())
}
