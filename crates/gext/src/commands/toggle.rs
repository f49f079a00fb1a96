//! Enable and disable commands

use anyhow::{bail, Context, Result};
use gext_extensions::StateChange;

use crate::cli::{GlobalArgs, UuidArgs};
use crate::output;
use crate::utils::{build_manager, RegistryUse};

#[derive(Debug, Clone, Copy)]
enum Toggle {
    Enable,
    Disable,
}

impl Toggle {
    fn applied_label(self) -> &'static str {
        match self {
            Toggle::Enable => "Enabled",
            Toggle::Disable => "Disabled",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Toggle::Enable => "enabled",
            Toggle::Disable => "disabled",
        }
    }
}

/// Add an installed extension to the enabled set
pub async fn enable(args: UuidArgs, global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Unused).await?;

    let change = manager
        .enable(&args.uuid)
        .await
        .with_context(|| format!("Failed to enable '{}'", args.uuid))?;

    if report(Toggle::Enable, &args.uuid, change)? {
        manager.notify_shell().await;
    }
    Ok(())
}

/// Remove an installed extension from the enabled set
pub async fn disable(args: UuidArgs, global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Unused).await?;

    let change = manager
        .disable(&args.uuid)
        .await
        .with_context(|| format!("Failed to disable '{}'", args.uuid))?;

    if report(Toggle::Disable, &args.uuid, change)? {
        manager.notify_shell().await;
    }
    Ok(())
}

/// Print the outcome; true when the enabled set was written
fn report(action: Toggle, uuid: &str, change: StateChange) -> Result<bool> {
    match change {
        StateChange::Applied => {
            output::success(&format!("{} {}", action.applied_label(), uuid));
            Ok(true)
        }
        StateChange::Unchanged => {
            output::info(&format!("{} is already {}", uuid, action.past_tense()));
            Ok(false)
        }
        StateChange::NotInstalled => bail!("Extension '{}' is not installed", uuid),
    }
}
