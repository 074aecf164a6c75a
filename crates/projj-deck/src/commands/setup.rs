//! Setup command - install or initialize projj

use anyhow::{Context as _, Result};
use projj_deck_manager::{ManagerSetup, INSTALL_COMMAND};

use crate::cli::SetupArgs;
use crate::context::Context;
use crate::output;

pub async fn run(args: SetupArgs, ctx: &Context) -> Result<()> {
    let setup = ManagerSetup::new(ctx.shell(), ctx.probe());

    if args.install {
        output::with_spinner(&format!("Running {}...", INSTALL_COMMAND), setup.install())
            .await
            .context("Failed to install projj")?;
        output::success("projj installed");
        output::hint("Run 'projj-deck setup --init' to choose base directories");
    }

    if args.init {
        setup.init().await.context("Failed to initialize projj")?;
        output::success("projj initialized");
    }

    Ok(())
}
