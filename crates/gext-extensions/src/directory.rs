//! Local extension directory
//!
//! Each installed extension occupies `<root>/<uuid>/` and carries a
//! `metadata.json` describing it. Every entry under the root counts as an
//! installed identifier, whether or not its metadata is readable.

use gext_core::types::LocalMetadata;
use gext_core::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Metadata file name inside each extension directory
pub const METADATA_FILE: &str = "metadata.json";

/// Directory holding one subdirectory per installed extension
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    root: PathBuf,
}

impl LocalDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the root directory exists
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Sorted names of every entry under the root
    ///
    /// A missing or unreadable root is a configuration error.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            Error::configuration(format!(
                "Cannot read extensions directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!("Skipping non UTF-8 entry {:?}", raw),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Path of the directory an extension is (or would be) installed into
    pub fn path(&self, uuid: &str) -> Result<PathBuf> {
        validate_uuid(uuid)?;
        Ok(self.root.join(uuid))
    }

    /// Read and parse `<root>/<uuid>/metadata.json`
    pub fn read_metadata(&self, uuid: &str) -> Result<LocalMetadata> {
        let path = self.path(uuid)?.join(METADATA_FILE);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Err(Error::not_installed(uuid));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| Error::corrupt_metadata(path, e))
    }

    /// Remove an extension directory and everything under it
    pub fn remove(&self, uuid: &str) -> Result<()> {
        let path = self.path(uuid)?;
        debug!("Removing {}", path.display());

        if path.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Reject identifiers that would address something outside the root
fn validate_uuid(uuid: &str) -> Result<()> {
    let bad = uuid.is_empty()
        || uuid == "."
        || uuid == ".."
        || uuid.contains('/')
        || uuid.contains('\\')
        || uuid.contains('\0');
    if bad {
        return Err(Error::invalid_uuid(uuid));
    }
    Ok(())
}
