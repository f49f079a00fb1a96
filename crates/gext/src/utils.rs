//! Wiring shared across CLI commands

use anyhow::{Context, Result};
use gext_core::types::RuntimeConfig;
use gext_core::utils::expand_home;
use gext_core::HierarchicalConfigLoader;
use gext_extensions::{
    detect_shell_version, DbusShellReload, ExtensionContext, ExtensionManager, GSettingsStore,
    HttpRegistry, LocalDirectory, NoReload, ZipInstaller,
};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Whether a command talks to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryUse {
    Required,
    Unused,
}

/// Load runtime configuration with CLI flags applied on top
pub fn load_config(global: &GlobalArgs) -> Result<RuntimeConfig> {
    let loader = HierarchicalConfigLoader::new().context("Failed to create config loader")?;
    let mut config = loader
        .load_runtime_config()
        .context("Failed to load runtime config")?;

    if let Some(dir) = &global.extensions_dir {
        config.shell.extensions_dir = dir.to_string();
    }
    if let Some(version) = &global.shell_version {
        config.shell.version = Some(version.clone());
    }

    Ok(config)
}

/// Resolve the extensions directory, expanding `~`
pub fn extensions_dir(config: &RuntimeConfig) -> Result<PathBuf> {
    expand_home(&config.shell.extensions_dir).context("Failed to resolve extensions directory")
}

/// Configured shell version, or the one reported by the running shell
async fn shell_version(config: &RuntimeConfig, usage: RegistryUse) -> Result<String> {
    if let Some(version) = &config.shell.version {
        return Ok(version.clone());
    }

    match detect_shell_version().await {
        Ok(version) => Ok(version),
        Err(e) if usage == RegistryUse::Unused => {
            debug!("Shell version unavailable: {}", e);
            Ok(String::new())
        }
        Err(e) => Err(e).context("Failed to determine shell version"),
    }
}

/// Build an extension manager backed by the real collaborators
pub async fn build_manager(global: &GlobalArgs, usage: RegistryUse) -> Result<ExtensionManager> {
    let config = load_config(global)?;
    let root = extensions_dir(&config)?;
    let shell_version = shell_version(&config, usage).await?;
    debug!(
        "Extensions directory {}, shell version '{}'",
        root.display(),
        shell_version
    );

    let store = GSettingsStore::new(&config.shell.settings_schema, &config.shell.enabled_key);
    let registry = HttpRegistry::new(&config.registry, &config.network)
        .context("Failed to initialize registry client")?;
    let installer =
        ZipInstaller::new(&config.network).context("Failed to initialize archive installer")?;

    let ctx = ExtensionContext::new(
        LocalDirectory::new(root),
        store,
        registry,
        installer,
        shell_version,
    );
    let ctx = if global.no_reload {
        ctx.with_reload(NoReload)
    } else {
        ctx.with_reload(DbusShellReload)
    };

    Ok(ExtensionManager::new(ctx))
}
