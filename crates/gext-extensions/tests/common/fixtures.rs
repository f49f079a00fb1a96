//! Extensions directory fixtures

#![allow(dead_code)]

use gext_extensions::METADATA_FILE;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary extensions directory
pub struct ExtensionsDir {
    temp_dir: TempDir,
    root: PathBuf,
}

impl ExtensionsDir {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("extensions");
        std::fs::create_dir_all(&root).expect("Failed to create extensions directory");
        Self { temp_dir, root }
    }

    /// A directory path whose extensions root does not exist
    pub fn missing() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("never-created");
        Self { temp_dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Install a supported extension at the given version
    pub fn install(&self, uuid: &str, version: &str) -> &Self {
        self.install_raw(uuid, &metadata_json(uuid, version))
    }

    /// Install with arbitrary metadata.json content
    pub fn install_raw(&self, uuid: &str, body: &str) -> &Self {
        let dir = self.root.join(uuid);
        std::fs::create_dir_all(&dir).expect("Failed to create extension directory");
        std::fs::write(dir.join(METADATA_FILE), body).expect("Failed to write metadata");
        self
    }

    /// Create an entry with no metadata.json at all
    pub fn install_bare(&self, uuid: &str) -> &Self {
        std::fs::create_dir_all(self.root.join(uuid)).expect("Failed to create directory");
        self
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.root.join(uuid).exists()
    }

    /// Version currently written in an extension's metadata.json
    pub fn installed_version(&self, uuid: &str) -> Option<String> {
        let body = std::fs::read_to_string(self.root.join(uuid).join(METADATA_FILE)).ok()?;
        let value: serde_json::Value = serde_json::from_str(&body).ok()?;
        match value.get("version")? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Complete metadata.json for a supported extension
pub fn metadata_json(uuid: &str, version: &str) -> String {
    let version = match version.parse::<u64>() {
        Ok(n) => json!(n),
        Err(_) => json!(version),
    };
    json!({
        "uuid": uuid,
        "name": display_name(uuid),
        "description": format!("Test extension {}", uuid),
        "version": version,
        "shell-version": ["45", "46"],
    })
    .to_string()
}

/// "weather@example.com" becomes "Weather"
pub fn display_name(uuid: &str) -> String {
    let stem = uuid.split('@').next().unwrap_or(uuid);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
