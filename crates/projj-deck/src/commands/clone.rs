//! Clone command - add a repository through projj

use anyhow::{bail, Context as _, Result};
use console::Term;
use dialoguer::Select;
use projj_deck_core::{ConfigReader, ManagerConfig};
use projj_deck_manager::{Application, CloneOrchestrator, ClonedProject};

use crate::cli::CloneArgs;
use crate::commands::require_ready;
use crate::context::Context;
use crate::output;

/// Follow-up choices offered after a clone with a known location
const FOLLOW_UPS: &[(&str, Option<Application>)] = &[
    ("Open in editor", Some(Application::Editor)),
    ("Open in terminal", Some(Application::Terminal)),
    ("Open in file browser", Some(Application::FileBrowser)),
    ("Done", None),
];

pub async fn run(args: CloneArgs, ctx: &Context) -> Result<()> {
    let probe = ctx.probe();
    require_ready(&probe).await?;

    let config = ConfigReader::new(&ctx.paths)
        .try_load()
        .context("Failed to read projj config")?;

    let base = match args.base {
        Some(base) => base,
        None => select_base_directory(&config)?,
    };

    let orchestrator = CloneOrchestrator::with_probe(ctx.shell(), ctx.paths.clone(), probe);

    let result = output::with_spinner(
        &format!("Cloning {} into {}...", args.url.trim(), base),
        orchestrator.clone(&args.url, &base, &config),
    )
    .await;

    let outcome = result?;
    let ambiguous = outcome.is_ambiguous();

    match outcome.into_result() {
        Ok(Some(project)) => {
            output::success(&format!("Cloned {}", project.name));
            output::kv("Location", &project.path);
            follow_up(ctx, &project, args.open.map(Application::from)).await?;
        }
        Ok(None) => {
            output::success("Repository cloned");
            if ambiguous {
                output::hint("projj did not report the clone location; see 'projj-deck list'");
            }
        }
        Err(e) => {
            output::error("Failed to clone repository");
            return Err(e).with_context(|| format!("projj could not add {}", args.url.trim()));
        }
    }

    Ok(())
}

/// The only base directory, or the user's pick
fn select_base_directory(config: &ManagerConfig) -> Result<String> {
    match config.base_directories.as_slice() {
        [] => bail!("No base directories configured. Run 'projj init' first."),
        [only] => Ok(only.clone()),
        dirs => {
            let selection = Select::new()
                .with_prompt("Select base directory")
                .items(dirs)
                .default(0)
                .interact()?;
            Ok(dirs[selection].clone())
        }
    }
}

async fn follow_up(
    ctx: &Context,
    project: &ClonedProject,
    requested: Option<Application>,
) -> Result<()> {
    let application = match requested {
        Some(application) => Some(application),
        None if Term::stdout().is_term() => {
            let labels: Vec<&str> = FOLLOW_UPS.iter().map(|(label, _)| *label).collect();
            let selection = Select::new()
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()?;
            FOLLOW_UPS[selection].1
        }
        None => None,
    };

    if let Some(application) = application {
        ctx.launcher().open(application, &project.path).await?;
        output::success(&format!("Opened {} in {}", project.name, application));
    }

    Ok(())
}
