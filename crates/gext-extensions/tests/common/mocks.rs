//! Mock implementations for testing
//!
//! Provides registry, installer and reload mocks that record their calls,
//! so lifecycle tests run without network access or a running shell.

#![allow(dead_code)]

use super::fixtures::{display_name, metadata_json, ExtensionsDir};
use async_trait::async_trait;
use gext_core::types::{RemoteMetadata, VersionField};
use gext_core::{Error, Result};
use gext_extensions::{
    ArchiveInstaller, ExtensionContext, ExtensionManager, InMemoryStore, LocalDirectory,
    RemoteRegistry, ShellReload,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const REGISTRY_BASE: &str = "https://registry.test";
pub const SHELL_VERSION: &str = "46";

/// Record of a registry detail lookup
#[derive(Clone, Debug, PartialEq)]
pub struct DetailCall {
    pub uuid: String,
    pub shell_version: String,
}

/// Mock registry backed by in-memory records
#[derive(Clone, Default)]
pub struct MockRegistry {
    records: Arc<Mutex<HashMap<String, RemoteMetadata>>>,
    searches: Arc<Mutex<HashMap<String, Vec<String>>>>,
    unreachable: Arc<Mutex<Vec<String>>>,
    offline: Arc<AtomicBool>,
    detail_calls: Arc<Mutex<Vec<DetailCall>>>,
    search_calls: Arc<Mutex<Vec<String>>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&self, record: RemoteMetadata) {
        self.records
            .lock()
            .unwrap()
            .insert(record.uuid.clone(), record);
    }

    /// Make `term` return the records of `uuids`, in order
    pub fn add_search(&self, term: &str, uuids: &[&str]) {
        self.searches.lock().unwrap().insert(
            term.to_string(),
            uuids.iter().map(|u| u.to_string()).collect(),
        );
    }

    /// Detail lookups for `uuid` fail with a transport error
    pub fn make_unreachable(&self, uuid: &str) {
        self.unreachable.lock().unwrap().push(uuid.to_string());
    }

    /// Every query fails with a transport error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn detail_calls(&self) -> Vec<DetailCall> {
        self.detail_calls.lock().unwrap().clone()
    }

    pub fn detail_call_count(&self, uuid: &str) -> usize {
        self.detail_calls()
            .iter()
            .filter(|c| c.uuid == uuid)
            .count()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteRegistry for MockRegistry {
    async fn detail(&self, uuid: &str, shell_version: &str) -> Result<RemoteMetadata> {
        self.detail_calls.lock().unwrap().push(DetailCall {
            uuid: uuid.to_string(),
            shell_version: shell_version.to_string(),
        });

        if self.offline.load(Ordering::SeqCst)
            || self.unreachable.lock().unwrap().iter().any(|u| u == uuid)
        {
            return Err(Error::transport("connection refused"));
        }

        self.records
            .lock()
            .unwrap()
            .get(uuid)
            .cloned()
            .ok_or_else(|| Error::not_found(uuid))
    }

    async fn search(&self, term: &str, _shell_version: &str) -> Result<Vec<RemoteMetadata>> {
        self.search_calls.lock().unwrap().push(term.to_string());

        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::transport("connection refused"));
        }

        let uuids = self
            .searches
            .lock()
            .unwrap()
            .get(term)
            .cloned()
            .unwrap_or_default();
        let records = self.records.lock().unwrap();
        Ok(uuids
            .iter()
            .filter_map(|uuid| records.get(uuid).cloned())
            .collect())
    }

    fn resolve_url(&self, relative: &str) -> Result<String> {
        Ok(format!("{}{}", REGISTRY_BASE, relative))
    }
}

/// Record of an installer invocation
#[derive(Clone, Debug, PartialEq)]
pub struct InstallCall {
    pub url: String,
    pub dest: PathBuf,
}

/// Mock installer that writes a prepared metadata.json per URL
#[derive(Clone, Default)]
pub struct MockInstaller {
    archives: Arc<Mutex<HashMap<String, String>>>,
    fail: Arc<AtomicBool>,
    calls: Arc<Mutex<Vec<InstallCall>>>,
}

impl MockInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `metadata` as the archive contents at `url`
    pub fn add_archive(&self, url: &str, metadata: String) {
        self.archives
            .lock()
            .unwrap()
            .insert(url.to_string(), metadata);
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveInstaller for MockInstaller {
    async fn fetch_and_unpack(&self, url: &str, dest: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(InstallCall {
            url: url.to_string(),
            dest: dest.to_path_buf(),
        });

        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::transport("download interrupted"));
        }

        let metadata = self
            .archives
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::transport(format!("404 for {}", url)))?;

        std::fs::create_dir_all(dest)?;
        std::fs::write(dest.join(gext_extensions::METADATA_FILE), metadata)?;
        Ok(())
    }
}

/// Mock reload trigger that counts notifications
#[derive(Clone, Default)]
pub struct MockReload {
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl MockReload {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ShellReload for MockReload {
    async fn notify(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::transport("no session bus"));
        }
        Ok(())
    }
}

/// A manager wired to mocks, with handles to inspect them
pub struct TestEnv {
    pub dir: ExtensionsDir,
    pub store: InMemoryStore,
    pub registry: MockRegistry,
    pub installer: MockInstaller,
    pub reload: MockReload,
    pub manager: ExtensionManager,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_dir(ExtensionsDir::new())
    }

    pub fn with_dir(dir: ExtensionsDir) -> Self {
        let store = InMemoryStore::new();
        let registry = MockRegistry::new();
        let installer = MockInstaller::new();
        let reload = MockReload::default();

        let ctx = ExtensionContext::new(
            LocalDirectory::new(dir.root()),
            store.clone(),
            registry.clone(),
            installer.clone(),
            SHELL_VERSION,
        )
        .with_reload(reload.clone());

        Self {
            dir,
            store,
            registry,
            installer,
            reload,
            manager: ExtensionManager::new(ctx),
        }
    }

    /// Publish `uuid` at `version`, with a downloadable archive
    pub fn publish(&self, uuid: &str, version: &str) -> RemoteMetadata {
        let relative = format!(
            "/download-extension/{}.shell-extension.zip?version_tag={}",
            uuid, version
        );

        let mut record = RemoteMetadata::new(uuid);
        record.name = Some(display_name(uuid));
        record.description = Some(format!("Test extension {}", uuid));
        record.version = Some(match version.parse::<u64>() {
            Ok(n) => VersionField::from(n),
            Err(_) => VersionField::from(version),
        });
        record.download_url = Some(relative.clone());

        self.registry.add_record(record.clone());
        self.installer.add_archive(
            &format!("{}{}", REGISTRY_BASE, relative),
            metadata_json(uuid, version),
        );
        record
    }

    /// Install locally and mark enabled in the store
    pub async fn install_enabled(&self, uuid: &str, version: &str) {
        self.dir.install(uuid, version);
        let mut set = self.store.snapshot();
        set.insert(uuid.to_string());
        gext_extensions::EnabledSetStore::set(&self.store, &set)
            .await
            .unwrap();
    }
}
