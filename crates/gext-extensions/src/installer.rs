//! Archive fetch and unpack
//!
//! Extensions are distributed as zip archives whose root is the extension
//! directory itself. Unpacking writes over whatever is already at the
//! destination; a failure part way leaves a partial tree behind.

use async_trait::async_trait;
use gext_core::types::NetworkConfig;
use gext_core::{Error, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Fetches an archive and unpacks it into a directory
#[async_trait]
pub trait ArchiveInstaller: Send + Sync {
    async fn fetch_and_unpack(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Installer that downloads zip archives over HTTP(S)
#[derive(Debug, Clone)]
pub struct ZipInstaller {
    client: reqwest::Client,
}

impl ZipInstaller {
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.download_timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Download of {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(format!(
                "Download of {} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("Download of {} interrupted: {}", url, e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ArchiveInstaller for ZipInstaller {
    async fn fetch_and_unpack(&self, url: &str, dest: &Path) -> Result<()> {
        let bytes = self.download(url).await?;
        info!("Fetched {} bytes, unpacking into {}", bytes.len(), dest.display());

        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || unpack_zip(&bytes, &dest))
            .await
            .map_err(|e| Error::transport(format!("Unpack task failed: {}", e)))?
    }
}

/// Unpack a zip archive held in memory into `dest`
///
/// Entries whose paths would land outside `dest` are rejected.
pub fn unpack_zip(bytes: &[u8], dest: &Path) -> Result<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::transport(format!("Invalid extension archive: {}", e)))?;

    std::fs::create_dir_all(dest)?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| Error::transport(format!("Unreadable archive entry: {}", e)))?;

        let relative: PathBuf = entry.enclosed_name().ok_or_else(|| {
            Error::transport(format!("Archive entry '{}' escapes destination", entry.name()))
        })?;
        let target = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = std::fs::File::create(&target)?;
        std::io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}
