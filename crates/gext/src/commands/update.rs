//! Update command

use anyhow::{bail, Context, Result};

use crate::cli::GlobalArgs;
use crate::output;
use crate::utils::{build_manager, RegistryUse};

/// Reinstall every outdated extension
pub async fn run(global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Required).await?;

    let spinner = output::spinner("Updating extensions...");
    let report = manager.update().await;
    spinner.finish_and_clear();
    let report = report.context("Failed to update extensions")?;

    for updated in &report.updated {
        output::success(&format!(
            "Updated {} from {} to {}",
            updated.uuid, updated.from, updated.to
        ));
    }
    for failure in &report.failures {
        output::warning(&format!("{}: {}", failure.uuid, failure.error));
    }

    if !report.updated.is_empty() {
        manager.notify_shell().await;
    } else if report.failures.is_empty() {
        output::success("All extensions are up to date");
    }

    if !report.failures.is_empty() {
        bail!("{} extension(s) could not be updated", report.failures.len());
    }
    Ok(())
}
