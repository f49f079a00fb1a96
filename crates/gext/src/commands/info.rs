//! Extension info command

use anyhow::{Context, Result};
use gext_core::types::{LocalMetadata, RemoteMetadata};

use crate::cli::{GlobalArgs, InfoArgs};
use crate::output;
use crate::utils::{build_manager, RegistryUse};

/// Show metadata for one extension
///
/// Displays the installed `metadata.json` by default, or the registry
/// record for the current shell version with `--remote`.
pub async fn run(args: InfoArgs, global: &GlobalArgs) -> Result<()> {
    let usage = if args.remote {
        RegistryUse::Required
    } else {
        RegistryUse::Unused
    };
    let manager = build_manager(global, usage).await?;

    let ext = manager
        .info(&args.uuid, args.remote)
        .await
        .with_context(|| format!("Failed to load metadata for '{}'", args.uuid))?;

    output::header(ext.display_name());
    output::kv("UUID", ext.uuid());

    if let Some(remote) = ext.cached_remote() {
        print_remote(remote);
    } else if let Some(local) = ext.cached_local() {
        print_local(local);
        let enabled = ext
            .is_enabled(manager.context())
            .await
            .context("Failed to read enabled extensions")?;
        output::kv("Enabled", if enabled { "yes" } else { "no" });
    }

    Ok(())
}

fn print_local(meta: &LocalMetadata) {
    if let Some(version) = &meta.version {
        output::kv("Version", &version.to_string());
    }
    if let Some(description) = &meta.description {
        output::kv("Description", description);
    }
    if !meta.shell_version.is_empty() {
        output::kv("Shell versions", &meta.shell_version.join(", "));
    }
    if let Some(url) = &meta.url {
        output::kv("URL", url);
    }
    let missing = meta.missing_required_fields();
    if !missing.is_empty() {
        output::warning(&format!(
            "Unsupported: metadata is missing {}",
            missing.join(", ")
        ));
    }
}

fn print_remote(meta: &RemoteMetadata) {
    if let Some(version) = &meta.version {
        output::kv("Version", &version.to_string());
    }
    if let Some(description) = &meta.description {
        output::kv("Description", description);
    }
    if let Some(creator) = &meta.creator {
        output::kv("Creator", creator);
    }
    if !meta.shell_version_map.is_empty() {
        let shells: Vec<&str> = meta.shell_version_map.keys().map(String::as_str).collect();
        output::kv("Shell versions", &shells.join(", "));
    }
    if let Some(link) = &meta.link {
        output::kv("Link", link);
    }
    if let Some(download) = &meta.download_url {
        output::kv("Download", download);
    }
}
