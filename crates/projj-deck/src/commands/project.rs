//! Per-project actions: open, path and url

use anyhow::{anyhow, bail, Context as _, Result};
use projj_deck_core::{CacheReader, ManagedProject};
use projj_deck_manager::Application;

use crate::cli::{OpenArgs, ProjectArgs};
use crate::context::Context;
use crate::output;

/// Find a project by cache key, location or directory name
///
/// Exact key or location matches win. A directory name must be unique.
fn find_project<'a>(projects: &'a [ManagedProject], query: &str) -> Result<&'a ManagedProject> {
    let query = query.trim_end_matches('/');

    if let Some(project) = projects
        .iter()
        .find(|p| p.name == query || p.location().trim_end_matches('/') == query)
    {
        return Ok(project);
    }

    let matches: Vec<&ManagedProject> = projects
        .iter()
        .filter(|p| p.display_name() == query)
        .collect();

    match matches.as_slice() {
        [] => Err(anyhow!("No project named '{}' in the projj cache", query)),
        [project] => Ok(project),
        many => {
            let locations: Vec<&str> = many.iter().map(|p| p.location()).collect();
            bail!(
                "'{}' matches {} projects; use the full location:\n  {}",
                query,
                many.len(),
                locations.join("\n  ")
            )
        }
    }
}

fn load_projects(ctx: &Context) -> Result<Vec<ManagedProject>> {
    CacheReader::new(&ctx.paths)
        .try_load()
        .context("Failed to load the projj cache")
}

pub async fn open(args: OpenArgs, ctx: &Context) -> Result<()> {
    let projects = load_projects(ctx)?;
    let project = find_project(&projects, &args.project)?;
    let application = Application::from(args.with);

    ctx.launcher().open(application, project.location()).await?;
    output::success(&format!(
        "Opened {} in {}",
        project.display_name(),
        application
    ));
    Ok(())
}

pub fn path(args: ProjectArgs, ctx: &Context) -> Result<()> {
    let projects = load_projects(ctx)?;
    let project = find_project(&projects, &args.project)?;
    println!("{}", project.location());
    Ok(())
}

pub fn url(args: ProjectArgs, ctx: &Context) -> Result<()> {
    let projects = load_projects(ctx)?;
    let project = find_project(&projects, &args.project)?;
    match &project.url {
        Some(url) if !url.is_empty() => {
            println!("{}", url);
            Ok(())
        }
        _ => bail!("No URL recorded for {}", project.display_name()),
    }
}
