//! A single extension, identified by uuid
//!
//! Local and remote metadata are loaded lazily and memoized per instance.
//! A lookup that fails is not cached, so a later call tries again; a
//! lookup that succeeds is never repeated. Callers that need fresh data
//! construct a new [`Extension`].

use crate::context::ExtensionContext;
use gext_core::types::{LocalMetadata, RemoteMetadata};
use gext_core::{Error, LooseVersion, Result};
use tokio::sync::OnceCell;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Extension {
    uuid: String,
    local: OnceCell<LocalMetadata>,
    remote: OnceCell<RemoteMetadata>,
}

impl Extension {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            local: OnceCell::new(),
            remote: OnceCell::new(),
        }
    }

    /// Build from a registry record; the record is taken as the remote metadata
    pub fn from_remote(record: RemoteMetadata) -> Self {
        Self {
            uuid: record.uuid.clone(),
            local: OnceCell::new(),
            remote: OnceCell::new_with(Some(record)),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Local metadata if it has already been loaded
    pub fn cached_local(&self) -> Option<&LocalMetadata> {
        self.local.get()
    }

    /// Remote metadata if it has already been loaded
    pub fn cached_remote(&self) -> Option<&RemoteMetadata> {
        self.remote.get()
    }

    /// Best available human name: local, then remote, then the uuid
    pub fn display_name(&self) -> &str {
        self.cached_local()
            .and_then(|m| m.name.as_deref())
            .or_else(|| self.cached_remote().and_then(|m| m.name.as_deref()))
            .unwrap_or(&self.uuid)
    }

    /// Parsed `metadata.json` from the local directory
    pub async fn local_metadata(&self, ctx: &ExtensionContext) -> Result<&LocalMetadata> {
        self.local
            .get_or_try_init(|| async { ctx.directory.read_metadata(&self.uuid) })
            .await
    }

    /// Registry detail record for the context's shell version
    pub async fn remote_metadata(&self, ctx: &ExtensionContext) -> Result<&RemoteMetadata> {
        self.remote
            .get_or_try_init(|| async {
                debug!("Fetching registry record for {}", self.uuid);
                ctx.registry.detail(&self.uuid, &ctx.shell_version).await
            })
            .await
    }

    pub async fn is_installed(&self, ctx: &ExtensionContext) -> bool {
        self.local_metadata(ctx).await.is_ok()
    }

    /// Installed and declares name, description and version
    pub async fn is_supported(&self, ctx: &ExtensionContext) -> bool {
        match self.local_metadata(ctx).await {
            Ok(meta) => meta.is_complete(),
            Err(_) => false,
        }
    }

    /// Whether the uuid is in the enabled-set store, installed or not
    pub async fn is_enabled(&self, ctx: &ExtensionContext) -> Result<bool> {
        Ok(ctx.store.get().await?.contains(&self.uuid))
    }

    /// Local version as declared in `metadata.json`
    pub async fn version(&self, ctx: &ExtensionContext) -> Result<LooseVersion> {
        let meta = self.local_metadata(ctx).await?;
        meta.version
            .as_ref()
            .map(|v| v.to_loose())
            .ok_or_else(|| Error::missing_field(&self.uuid, "version"))
    }

    /// Version the registry offers for the context's shell version
    pub async fn remote_version(&self, ctx: &ExtensionContext) -> Result<LooseVersion> {
        let meta = self.remote_metadata(ctx).await?;
        meta.version
            .as_ref()
            .map(|v| v.to_loose())
            .ok_or_else(|| Error::missing_field(&self.uuid, "version"))
    }

    /// Remote version strictly greater than local version
    pub async fn is_outdated(&self, ctx: &ExtensionContext) -> Result<bool> {
        let local = self.version(ctx).await?;
        let remote = self.remote_version(ctx).await?;
        Ok(remote > local)
    }
}
