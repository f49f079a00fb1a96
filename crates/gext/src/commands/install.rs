//! Extension install command

use anyhow::{Context, Result};
use gext_extensions::StateChange;

use crate::cli::{GlobalArgs, InstallArgs};
use crate::output;
use crate::utils::{build_manager, RegistryUse};

/// Install an extension from the registry
///
/// Supports:
/// - Install only: `gext install foo@example.com`
/// - Install and enable: `gext install foo@example.com --enable`
pub async fn run(args: InstallArgs, global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Required).await?;

    let spinner = output::spinner(&format!("Installing {}...", args.uuid));
    let result = manager.install(&args.uuid).await;
    spinner.finish_and_clear();
    let ext = result.with_context(|| format!("Failed to install '{}'", args.uuid))?;

    let version = ext
        .cached_remote()
        .and_then(|r| r.version.as_ref())
        .map(|v| format!(" version {}", v))
        .unwrap_or_default();
    output::success(&format!("Installed {}{}", ext.display_name(), version));

    if args.enable {
        match manager
            .enable(&args.uuid)
            .await
            .with_context(|| format!("Failed to enable '{}'", args.uuid))?
        {
            StateChange::Applied | StateChange::Unchanged => {
                output::success(&format!("Enabled {}", args.uuid))
            }
            StateChange::NotInstalled => output::warning(&format!(
                "{} did not appear in the extensions directory; not enabled",
                args.uuid
            )),
        }
    }

    manager.notify_shell().await;
    Ok(())
}
