//! Outdated command

use anyhow::{Context, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::GlobalArgs;
use crate::output;
use crate::utils::{build_manager, RegistryUse};

#[derive(Tabled)]
struct OutdatedRow {
    name: String,
    uuid: String,
    installed: String,
    available: String,
}

/// Show installed extensions with a newer registry version
pub async fn run(global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Required).await?;
    let ctx = manager.context();

    let spinner = output::spinner("Checking the registry for updates...");
    let report = manager.outdated().await;
    spinner.finish_and_clear();
    let report = report.context("Failed to check for outdated extensions")?;

    for failure in &report.failures {
        output::warning(&format!("{}: {}", failure.uuid, failure.error));
    }

    if report.outdated.is_empty() {
        output::success("All extensions are up to date");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(report.outdated.len());
    for ext in &report.outdated {
        rows.push(OutdatedRow {
            name: ext.display_name().to_string(),
            uuid: ext.uuid().to_string(),
            installed: ext.version(ctx).await?.to_string(),
            available: ext.remote_version(ctx).await?.to_string(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}
