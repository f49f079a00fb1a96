//! Error types for gext-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using gext-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for extension lifecycle operations
#[derive(Error, Debug)]
pub enum Error {
    /// The operation requires an installed extension that is absent
    #[error("Extension '{uuid}' is not installed")]
    NotInstalled { uuid: String },

    /// The registry has no record for the identifier
    #[error("Extension '{uuid}' was not found in the registry")]
    NotFound { uuid: String },

    /// Metadata file is present but cannot be parsed
    #[error("Corrupt metadata at {}: {reason}", path.display())]
    CorruptMetadata { path: PathBuf, reason: String },

    /// Metadata parsed but lacks a field the operation needs
    #[error("Metadata for '{uuid}' is missing required field '{field}'")]
    MissingField { uuid: String, field: String },

    /// Identifier cannot name a directory entry
    #[error("Invalid extension identifier '{uuid}'")]
    InvalidUuid { uuid: String },

    /// Network or archive failure
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Local configuration is unusable (extension directory, config file, home dir)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Enabled-set store could not be read or written
    #[error("Enabled-set store error: {message}")]
    Store { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a not installed error
    pub fn not_installed(uuid: impl Into<String>) -> Self {
        Self::NotInstalled { uuid: uuid.into() }
    }

    /// Create a registry not found error
    pub fn not_found(uuid: impl Into<String>) -> Self {
        Self::NotFound { uuid: uuid.into() }
    }

    /// Create a corrupt metadata error
    pub fn corrupt_metadata(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptMetadata {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(uuid: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            uuid: uuid.into(),
            field: field.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_uuid(uuid: impl Into<String>) -> Self {
        Self::InvalidUuid { uuid: uuid.into() }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Whether the registry reported no record for the identifier
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the target extension is not installed
    pub fn is_not_installed(&self) -> bool {
        matches!(self, Self::NotInstalled { .. })
    }
}
