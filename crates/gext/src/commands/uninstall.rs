//! Extension uninstall command

use anyhow::{Context, Result};
use dialoguer::Confirm;

use crate::cli::{GlobalArgs, UninstallArgs};
use crate::output;
use crate::utils::{build_manager, RegistryUse};

/// Disable and delete an installed extension
///
/// Supports:
/// - Remove with confirmation: `gext uninstall foo@example.com`
/// - Skip the prompt: `gext uninstall foo@example.com -y`
pub async fn run(args: UninstallArgs, global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Unused).await?;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Uninstall {}?", args.uuid))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    manager
        .uninstall(&args.uuid)
        .await
        .with_context(|| format!("Failed to uninstall '{}'", args.uuid))?;

    output::success(&format!("Uninstalled {}", args.uuid));
    manager.notify_shell().await;
    Ok(())
}
