//! # gext-core
//!
//! Core library for the gext CLI providing:
//! - The error taxonomy shared by every gext crate
//! - Runtime configuration loading (embedded defaults, user file, environment)
//! - Metadata schema for local and remote extension records
//! - Loose version ordering for registry version strings

pub mod config;
pub mod error;
pub mod types;
pub mod utils;
pub mod version;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use utils::get_home_dir;
pub use version::LooseVersion;
