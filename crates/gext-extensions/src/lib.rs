//! Extension lifecycle management for gext
//!
//! This crate answers questions about the installed, enabled and outdated
//! extension sets and performs the transitions between them:
//! - Local extension directory access
//! - Enabled-set store (GSettings backed)
//! - Remote registry queries and archive installation
//! - Per-extension metadata with memoized lookups
//! - Manager-level reconciliation (enable, disable, install, uninstall, update)

pub mod context;
pub mod directory;
pub mod extension;
pub mod installer;
pub mod manager;
pub mod registry;
pub mod shell;
pub mod store;

pub use context::ExtensionContext;
pub use directory::{LocalDirectory, METADATA_FILE};
pub use extension::Extension;
pub use installer::{ArchiveInstaller, ZipInstaller};
pub use manager::{
    ExtensionManager, ItemFailure, OutdatedReport, SearchHit, StateChange, UpdateReport, Updated,
};
pub use registry::{HttpRegistry, RemoteRegistry};
pub use shell::{detect_shell_version, DbusShellReload, NoReload, ShellReload};
pub use store::{EnabledSetStore, GSettingsStore, InMemoryStore};
