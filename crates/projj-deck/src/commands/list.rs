//! List command - show projects from the projj cache

use anyhow::{Context as _, Result};
use projj_deck_core::{CacheReader, ManagedProject};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::ListArgs;
use crate::context::Context;
use crate::output;

/// Table row for the project list
#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "OWNER")]
    owner: String,
    #[tabled(rename = "LOCATION")]
    location: String,
}

impl From<&ManagedProject> for ProjectRow {
    fn from(project: &ManagedProject) -> Self {
        Self {
            name: project.display_name(),
            owner: project.owner().unwrap_or_else(|| "-".to_string()),
            location: project.location().to_string(),
        }
    }
}

/// JSON entry for the project list
#[derive(Debug, Serialize)]
pub(crate) struct ProjectEntry {
    pub name: String,
    pub key: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&ManagedProject> for ProjectEntry {
    fn from(project: &ManagedProject) -> Self {
        Self {
            name: project.display_name(),
            key: project.name.clone(),
            location: project.location().to_string(),
            owner: project.owner(),
            url: project.url.clone(),
        }
    }
}

/// Most recently added projects last in the cache; shown first by default
fn ordered(mut projects: Vec<ManagedProject>, oldest_first: bool) -> Vec<ManagedProject> {
    if !oldest_first {
        projects.reverse();
    }
    projects
}

pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let reader = CacheReader::new(&ctx.paths);

    let projects = match reader.try_load() {
        Ok(projects) => ordered(projects, args.oldest_first),
        // An unreadable cache must not look like an empty one on stdout
        Err(e) if args.json => return Err(e).context("Failed to load the projj cache"),
        Err(e) => {
            output::warning("Could not load the projj cache");
            eprintln!("  {}", e);
            output::hint("Clone a repository with 'projj-deck clone <url>' or run 'projj init'");
            return Ok(());
        }
    };

    if args.json {
        let entries: Vec<ProjectEntry> = projects.iter().map(ProjectEntry::from).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if projects.is_empty() {
        output::info("No projects yet");
        output::hint("Clone a repository with 'projj-deck clone <url>'");
        return Ok(());
    }

    let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    println!("{} project(s)", projects.len());

    Ok(())
}
