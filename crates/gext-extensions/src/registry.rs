//! Remote extension registry
//!
//! The registry answers two queries, both filtered by shell version:
//! - detail: the record for one identifier (404 when unknown)
//! - search: a list of records matching a free-text term
//!
//! Download locations in records are relative to the registry root.

use async_trait::async_trait;
use gext_core::types::{NetworkConfig, RegistryConfig, RemoteMetadata, SearchResponse};
use gext_core::{Error, Result};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Queries against the extension registry
#[async_trait]
pub trait RemoteRegistry: Send + Sync {
    /// Record for one identifier; `NotFound` if the registry has none
    async fn detail(&self, uuid: &str, shell_version: &str) -> Result<RemoteMetadata>;

    /// Records matching a search term
    async fn search(&self, term: &str, shell_version: &str) -> Result<Vec<RemoteMetadata>>;

    /// Turn a registry-relative location into an absolute URL
    fn resolve_url(&self, relative: &str) -> Result<String>;
}

/// Registry reached over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::Client,
    base: Url,
    detail_path: String,
    search_path: String,
}

impl HttpRegistry {
    /// Create a registry client from configuration
    pub fn new(registry: &RegistryConfig, network: &NetworkConfig) -> Result<Self> {
        let mut base = Url::parse(&registry.url).map_err(|e| {
            Error::configuration(format!("Invalid registry URL '{}': {}", registry.url, e))
        })?;
        // Endpoint paths are joined beneath any path prefix on the base
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }

        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            detail_path: registry.detail_path.clone(),
            search_path: registry.search_path.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::configuration(format!("Invalid registry path '{}': {}", path, e)))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        debug!("GET {}", url);
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::transport(format!("Request to {} failed: {}", url, e)))
    }
}

#[async_trait]
impl RemoteRegistry for HttpRegistry {
    async fn detail(&self, uuid: &str, shell_version: &str) -> Result<RemoteMetadata> {
        let url = self.endpoint(
            &self.detail_path,
            &[("uuid", uuid), ("shell_version", shell_version)],
        )?;
        let response = self.get(url.clone()).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::not_found(uuid)),
            status if !status.is_success() => Err(Error::transport(format!(
                "Registry returned {} for {}",
                status, url
            ))),
            _ => response.json::<RemoteMetadata>().await.map_err(|e| {
                Error::transport(format!("Invalid registry record for '{}': {}", uuid, e))
            }),
        }
    }

    async fn search(&self, term: &str, shell_version: &str) -> Result<Vec<RemoteMetadata>> {
        let url = self.endpoint(
            &self.search_path,
            &[("search", term), ("shell_version", shell_version)],
        )?;
        let response = self.get(url.clone()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(format!(
                "Registry returned {} for {}",
                status, url
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::transport(format!("Invalid search response: {}", e)))?;

        debug!("Search '{}' returned {} records", term, body.extensions.len());
        Ok(body.extensions)
    }

    /// Root-relative locations (`/download-extension/..`) resolve against
    /// the registry origin, as the registry emits them.
    fn resolve_url(&self, relative: &str) -> Result<String> {
        self.base
            .join(relative)
            .map(String::from)
            .map_err(|e| Error::transport(format!("Invalid download location '{}': {}", relative, e)))
    }
}
