//! Extension list commands (ls, enabled, disabled)

use anyhow::{Context, Result};
use gext_extensions::{Extension, ExtensionManager};
use serde::Serialize;
use std::collections::BTreeSet;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::{GlobalArgs, ListArgs};
use crate::output;
use crate::utils::{build_manager, RegistryUse};

/// Which subset of installed extensions to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Installed,
    Enabled,
    Disabled,
}

impl Selection {
    fn label(self) -> &'static str {
        match self {
            Selection::Installed => "installed",
            Selection::Enabled => "enabled",
            Selection::Disabled => "disabled",
        }
    }
}

#[derive(Tabled, Serialize)]
struct ExtensionRow {
    name: String,
    uuid: String,
    version: String,
    state: String,
}

/// List extensions in the selected state
///
/// Supports:
/// - Installed and supported: `gext ls`
/// - By state: `gext enabled`, `gext disabled`
/// - JSON output: `gext ls --json`
pub async fn run(args: ListArgs, selection: Selection, global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Unused).await?;

    let extensions = match selection {
        Selection::Installed => manager.installed().await,
        Selection::Enabled => manager.enabled().await,
        Selection::Disabled => manager.disabled().await,
    }
    .with_context(|| format!("Failed to list {} extensions", selection.label()))?;

    let enabled = manager
        .enabled_uuids()
        .await
        .context("Failed to read enabled extensions")?;

    let rows = build_rows(&manager, &extensions, &enabled).await;

    if args.json {
        let json = serde_json::to_string_pretty(&rows).context("Failed to serialize to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    if rows.is_empty() {
        output::info(&format!("No {} extensions", selection.label()));
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}

async fn build_rows(
    manager: &ExtensionManager,
    extensions: &[Extension],
    enabled: &BTreeSet<String>,
) -> Vec<ExtensionRow> {
    let ctx = manager.context();
    let mut rows = Vec::with_capacity(extensions.len());

    for ext in extensions {
        // Enabled/disabled listings include entries whose metadata is unreadable
        let version = match ext.local_metadata(ctx).await {
            Ok(meta) => meta
                .version
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            Err(_) => "-".to_string(),
        };

        let state = if enabled.contains(ext.uuid()) {
            "enabled"
        } else {
            "disabled"
        };

        rows.push(ExtensionRow {
            name: ext.display_name().to_string(),
            uuid: ext.uuid().to_string(),
            version,
            state: state.to_string(),
        });
    }

    rows
}
