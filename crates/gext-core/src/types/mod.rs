//! Type definitions for gext configuration and extension metadata

mod metadata;
mod runtime_config;

pub use metadata::*;
pub use runtime_config::*;
