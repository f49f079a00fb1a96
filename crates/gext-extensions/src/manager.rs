//! Extension set reconciliation
//!
//! The manager derives three identifier sets from its collaborators:
//!
//! - installed: every entry in the local extension directory
//! - enabled: the enabled-set store intersected with installed
//! - disabled: installed minus enabled
//!
//! and moves extensions between them. Enabled-set writes always replace
//! the whole set. Operations run one step at a time; nothing is retried
//! and nothing is rolled back.

use crate::context::ExtensionContext;
use crate::extension::Extension;
use gext_core::{Error, Result};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Result of an enable or disable request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// The enabled set was rewritten
    Applied,
    /// Already in the requested state; nothing was written
    Unchanged,
    /// Not installed; nothing was written
    NotInstalled,
}

/// A per-extension failure collected during a multi-extension operation
#[derive(Debug)]
pub struct ItemFailure {
    pub uuid: String,
    pub error: Error,
}

/// Outcome of an outdated scan
#[derive(Debug, Default)]
pub struct OutdatedReport {
    /// Extensions whose registry version is newer than the installed one
    pub outdated: Vec<Extension>,
    /// Extensions whose comparison could not be made
    pub failures: Vec<ItemFailure>,
}

/// An extension moved to a newer version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated {
    pub uuid: String,
    pub from: String,
    pub to: String,
}

/// Outcome of updating every outdated extension
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub updated: Vec<Updated>,
    pub failures: Vec<ItemFailure>,
}

/// A search result paired with local install state
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub extension: Extension,
    pub installed: bool,
}

/// Coordinates extension state across directory, store and registry
pub struct ExtensionManager {
    ctx: ExtensionContext,
}

impl ExtensionManager {
    pub fn new(ctx: ExtensionContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ExtensionContext {
        &self.ctx
    }

    pub fn shell_version(&self) -> &str {
        &self.ctx.shell_version
    }

    /// Every identifier present in the extension directory
    pub fn installed_uuids(&self) -> Result<BTreeSet<String>> {
        Ok(self.ctx.directory.list()?.into_iter().collect())
    }

    /// Installed extensions that are supported
    ///
    /// Entries with unreadable or incomplete metadata are skipped with a
    /// warning naming the problem.
    pub async fn installed(&self) -> Result<Vec<Extension>> {
        let mut extensions = Vec::new();

        for uuid in self.installed_uuids()? {
            let ext = Extension::new(uuid);
            match ext.local_metadata(&self.ctx).await {
                Ok(meta) if meta.is_complete() => {}
                Ok(meta) => {
                    warn!(
                        uuid = %ext.uuid(),
                        "Skipping unsupported extension: metadata is missing {}",
                        meta.missing_required_fields().join(", ")
                    );
                    continue;
                }
                Err(e) => {
                    warn!(uuid = %ext.uuid(), "Skipping unreadable extension: {}", e);
                    continue;
                }
            }
            extensions.push(ext);
        }

        Ok(extensions)
    }

    /// Store contents restricted to installed identifiers
    pub async fn enabled_uuids(&self) -> Result<BTreeSet<String>> {
        let installed = self.installed_uuids()?;
        let stored = self.ctx.store.get().await?;

        let stale: Vec<&String> = stored.difference(&installed).collect();
        if !stale.is_empty() {
            debug!("Ignoring enabled entries that are not installed: {:?}", stale);
        }

        Ok(stored.intersection(&installed).cloned().collect())
    }

    pub async fn enabled(&self) -> Result<Vec<Extension>> {
        Ok(self
            .enabled_uuids()
            .await?
            .into_iter()
            .map(Extension::new)
            .collect())
    }

    /// Installed identifiers absent from the store
    pub async fn disabled_uuids(&self) -> Result<BTreeSet<String>> {
        let installed = self.installed_uuids()?;
        let enabled = self.enabled_uuids().await?;
        Ok(installed.difference(&enabled).cloned().collect())
    }

    pub async fn disabled(&self) -> Result<Vec<Extension>> {
        Ok(self
            .disabled_uuids()
            .await?
            .into_iter()
            .map(Extension::new)
            .collect())
    }

    /// Supported installed extensions with a newer registry version
    ///
    /// A failed lookup is recorded and the scan moves on.
    pub async fn outdated(&self) -> Result<OutdatedReport> {
        let mut report = OutdatedReport::default();

        for ext in self.installed().await? {
            match ext.is_outdated(&self.ctx).await {
                Ok(true) => report.outdated.push(ext),
                Ok(false) => debug!("{} is up to date", ext.uuid()),
                Err(e) => {
                    warn!(uuid = %ext.uuid(), "Could not check for updates: {}", e);
                    report.failures.push(ItemFailure {
                        uuid: ext.uuid().to_string(),
                        error: e,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Extension with local metadata loaded, or the registry record when `remote`
    pub async fn info(&self, uuid: &str, remote: bool) -> Result<Extension> {
        let ext = Extension::new(uuid);
        if remote {
            ext.remote_metadata(&self.ctx).await?;
        } else {
            ext.local_metadata(&self.ctx).await?;
        }
        Ok(ext)
    }

    /// Registry search; each result carries its record as remote metadata
    pub async fn search(&self, term: &str, shell_version: &str) -> Result<Vec<Extension>> {
        let records = self.ctx.registry.search(term, shell_version).await?;
        Ok(records.into_iter().map(Extension::from_remote).collect())
    }

    /// Search results flagged with whether each is installed
    pub async fn search_listing(&self, term: &str, shell_version: &str) -> Result<Vec<SearchHit>> {
        let installed = if self.ctx.directory.exists() {
            self.installed_uuids()?
        } else {
            BTreeSet::new()
        };

        Ok(self
            .search(term, shell_version)
            .await?
            .into_iter()
            .map(|extension| SearchHit {
                installed: installed.contains(extension.uuid()),
                extension,
            })
            .collect())
    }

    /// Add an installed extension to the enabled set
    pub async fn enable(&self, uuid: &str) -> Result<StateChange> {
        if !self.installed_uuids()?.contains(uuid) {
            warn!("Cannot enable {}: not installed", uuid);
            return Ok(StateChange::NotInstalled);
        }

        let mut enabled = self.ctx.store.get().await?;
        if enabled.contains(uuid) {
            debug!("{} is already enabled", uuid);
            return Ok(StateChange::Unchanged);
        }

        enabled.insert(uuid.to_string());
        self.ctx.store.set(&enabled).await?;
        info!("Enabled {}", uuid);
        Ok(StateChange::Applied)
    }

    /// Remove an installed extension from the enabled set
    pub async fn disable(&self, uuid: &str) -> Result<StateChange> {
        if !self.installed_uuids()?.contains(uuid) {
            return Err(Error::not_installed(uuid));
        }

        let mut enabled = self.ctx.store.get().await?;
        if !enabled.remove(uuid) {
            debug!("{} is already disabled", uuid);
            return Ok(StateChange::Unchanged);
        }

        self.ctx.store.set(&enabled).await?;
        info!("Disabled {}", uuid);
        Ok(StateChange::Applied)
    }

    /// Fetch the registry archive for this shell version and unpack it
    ///
    /// Installing never enables. The returned extension carries the
    /// registry record that was installed.
    pub async fn install(&self, uuid: &str) -> Result<Extension> {
        self.install_extension(Extension::new(uuid)).await
    }

    /// Install using whatever registry record `ext` already carries
    async fn install_extension(&self, ext: Extension) -> Result<Extension> {
        let uuid = ext.uuid();
        let dest = self.ctx.directory.path(uuid)?;

        let record = ext.remote_metadata(&self.ctx).await?;
        let relative = record
            .download_url
            .as_deref()
            .ok_or_else(|| Error::missing_field(uuid, "download_url"))?;
        let url = self.ctx.registry.resolve_url(relative)?;

        info!("Installing {} from {}", uuid, url);
        self.ctx.installer.fetch_and_unpack(&url, &dest).await?;
        Ok(ext)
    }

    /// Disable then delete an installed extension
    ///
    /// If disabling fails nothing is deleted.
    pub async fn uninstall(&self, uuid: &str) -> Result<()> {
        if !self.installed_uuids()?.contains(uuid) {
            return Err(Error::not_installed(uuid));
        }

        self.disable(uuid).await?;
        self.ctx.directory.remove(uuid)?;
        info!("Uninstalled {}", uuid);
        Ok(())
    }

    /// Uninstall and install again, restoring the enabled state
    ///
    /// If the install step fails the extension stays uninstalled.
    pub async fn reinstall(&self, uuid: &str) -> Result<Extension> {
        self.reinstall_extension(Extension::new(uuid)).await
    }

    async fn reinstall_extension(&self, ext: Extension) -> Result<Extension> {
        let uuid = ext.uuid();
        if !self.installed_uuids()?.contains(uuid) {
            return Err(Error::not_installed(uuid));
        }

        let was_enabled = ext.is_enabled(&self.ctx).await?;
        self.uninstall(uuid).await?;
        // Local metadata cached on `ext` describes the removed copy
        let fresh = match ext.cached_remote() {
            Some(record) => Extension::from_remote(record.clone()),
            None => Extension::new(uuid),
        };
        let ext = self.install_extension(fresh).await?;

        if was_enabled {
            self.enable(uuid).await?;
        }
        Ok(ext)
    }

    /// Reinstall every outdated extension
    pub async fn update(&self) -> Result<UpdateReport> {
        let scan = self.outdated().await?;
        let mut report = UpdateReport {
            updated: Vec::new(),
            failures: scan.failures,
        };

        for ext in scan.outdated {
            let from = ext.version(&self.ctx).await?.to_string();
            let to = ext.remote_version(&self.ctx).await?.to_string();

            let uuid = ext.uuid().to_string();

            // The scanned record is reused, so no second detail lookup
            match self.reinstall_extension(ext).await {
                Ok(_) => {
                    info!("Updated {} from {} to {}", uuid, from, to);
                    report.updated.push(Updated { uuid, from, to });
                }
                Err(e) => {
                    warn!(uuid = %uuid, "Failed to update: {}", e);
                    report.failures.push(ItemFailure { uuid, error: e });
                }
            }
        }

        Ok(report)
    }

    /// Ask the running shell to reload; failures are logged and ignored
    pub async fn notify_shell(&self) {
        if let Err(e) = self.ctx.reload.notify().await {
            debug!("Shell reload request failed: {}", e);
        }
    }
}
