//! Runtime configuration types
//!
//! These types control where extensions live, which registry is queried
//! and how long network requests may take.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Desktop shell integration
    #[serde(default)]
    pub shell: ShellConfig,

    /// Remote registry endpoints
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Desktop shell integration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShellConfig {
    /// Directory holding one subdirectory per installed extension (`~` is expanded)
    #[serde(default = "default_extensions_dir")]
    pub extensions_dir: String,

    /// Shell version override; detected from `gnome-shell --version` when unset
    #[serde(default)]
    pub version: Option<String>,

    /// GSettings schema holding the enabled set
    #[serde(default = "default_settings_schema")]
    pub settings_schema: String,

    /// GSettings key holding the enabled set
    #[serde(default = "default_enabled_key")]
    pub enabled_key: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            extensions_dir: default_extensions_dir(),
            version: None,
            settings_schema: default_settings_schema(),
            enabled_key: default_enabled_key(),
        }
    }
}

fn default_extensions_dir() -> String {
    "~/.local/share/gnome-shell/extensions".to_string()
}
fn default_settings_schema() -> String {
    "org.gnome.shell".to_string()
}
fn default_enabled_key() -> String {
    "enabled-extensions".to_string()
}

/// Remote registry endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryConfig {
    /// Registry root; relative download URLs resolve against it
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Detail query path
    #[serde(default = "default_detail_path")]
    pub detail_path: String,

    /// Search query path
    #[serde(default = "default_search_path")]
    pub search_path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            detail_path: default_detail_path(),
            search_path: default_search_path(),
        }
    }
}

fn default_registry_url() -> String {
    "https://extensions.gnome.org".to_string()
}
fn default_detail_path() -> String {
    "/extension-info/".to_string()
}
fn default_search_path() -> String {
    "/extension-query/".to_string()
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Registry request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Archive download timeout in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    120
}
fn default_user_agent() -> String {
    format!(
        "gext/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: RuntimeConfig = serde_yaml_ng::from_str(
            r#"
registry:
  url: "http://localhost:8080"
"#,
        )
        .unwrap();

        assert_eq!(config.registry.url, "http://localhost:8080");
        assert_eq!(config.registry.detail_path, "/extension-info/");
        assert_eq!(config.network.http_timeout_secs, 30);
        assert_eq!(config.shell.enabled_key, "enabled-extensions");
    }

    #[test]
    fn test_user_agent_names_the_tool() {
        assert!(NetworkConfig::default().user_agent.starts_with("gext/"));
    }
}
