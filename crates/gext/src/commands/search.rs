//! Registry search command

use anyhow::{Context, Result};
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

use crate::cli::{GlobalArgs, SearchArgs};
use crate::output;
use crate::utils::{build_manager, RegistryUse};

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "")]
    installed: String,
    name: String,
    uuid: String,
    description: String,
}

/// Search the registry, marking results that are already installed
pub async fn run(args: SearchArgs, global: &GlobalArgs) -> Result<()> {
    let manager = build_manager(global, RegistryUse::Required).await?;

    let spinner = output::spinner(&format!("Searching for '{}'...", args.term));
    let hits = manager
        .search_listing(&args.term, manager.shell_version())
        .await;
    spinner.finish_and_clear();
    let hits = hits.with_context(|| format!("Search for '{}' failed", args.term))?;

    if hits.is_empty() {
        output::info(&format!("No extensions match '{}'", args.term));
        return Ok(());
    }

    let rows: Vec<SearchRow> = hits
        .iter()
        .map(|hit| {
            let description = hit
                .extension
                .cached_remote()
                .and_then(|r| r.description.as_deref())
                .and_then(|d| d.lines().next())
                .unwrap_or("")
                .to_string();
            SearchRow {
                installed: if hit.installed { output::CHECK } else { "" }.to_string(),
                name: hit.extension.display_name().to_string(),
                uuid: hit.extension.uuid().to_string(),
                description,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .with(Modify::new(Columns::new(3..4)).with(Width::wrap(60).keep_words(true)));
    println!("{}", table);
    Ok(())
}
