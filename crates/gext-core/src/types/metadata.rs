//! Extension metadata records
//!
//! Local metadata is the `metadata.json` shipped inside every installed
//! extension directory. Remote metadata is a registry detail or search
//! record. Both tolerate missing fields at parse time; whether an
//! extension is manageable is decided later from what is present.

use crate::version::LooseVersion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fields an installed extension must declare to be manageable
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "description", "version"];

/// A version field that may be published as a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionField {
    Number(serde_json::Number),
    Text(String),
}

impl VersionField {
    /// Coerce to a string and parse loosely
    pub fn to_loose(&self) -> LooseVersion {
        LooseVersion::parse(&self.to_string())
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionField::Number(n) => write!(f, "{n}"),
            VersionField::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for VersionField {
    fn from(s: &str) -> Self {
        VersionField::Text(s.to_string())
    }
}

impl From<u64> for VersionField {
    fn from(n: u64) -> Self {
        VersionField::Number(n.into())
    }
}

/// Contents of `<extensions-dir>/<uuid>/metadata.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionField>,

    /// Shell versions the extension declares support for
    #[serde(
        rename = "shell-version",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub shell_version: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Every other key, preserved as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl LocalMetadata {
    /// Required fields that are absent, in declaration order
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let present = [
            self.name.is_some(),
            self.description.is_some(),
            self.version.is_some(),
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(field, _)| *field)
            .collect()
    }

    /// True when name, description and version are all present
    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }
}

/// Per-shell-version release information in a registry record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellVersionRelease {
    /// Registry primary key of the release
    #[serde(default)]
    pub pk: Option<u64>,

    #[serde(default)]
    pub version: Option<VersionField>,
}

/// A registry detail or search record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteMetadata {
    pub uuid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionField>,

    /// Archive location, relative to the registry root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    /// Shell version string to release info. Not consulted when choosing what to install.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shell_version_map: BTreeMap<String, ShellVersionRelease>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RemoteMetadata {
    /// Minimal record with only an identifier
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: None,
            description: None,
            version: None,
            download_url: None,
            shell_version_map: BTreeMap::new(),
            creator: None,
            link: None,
            pk: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Registry search response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub extensions: Vec<RemoteMetadata>,

    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub numpages: Option<u64>,
}
