//! Extension reinstall command

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, UuidArgs};
use crate::output;
use crate::utils::{build_manager, RegistryUse};

/// Uninstall and install again from the registry, keeping the enabled state
pub async fn run(args: UuidArgs, global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Required).await?;

    let spinner = output::spinner(&format!("Reinstalling {}...", args.uuid));
    let result = manager.reinstall(&args.uuid).await;
    spinner.finish_and_clear();

    let outcome = result.with_context(|| format!("Failed to reinstall '{}'", args.uuid));
    // The old copy may already be gone; let the shell see that either way
    manager.notify_shell().await;
    let ext = outcome?;

    output::success(&format!("Reinstalled {}", ext.display_name()));
    Ok(())
}
