//! Command implementations
//!
//! - ls / enabled / disabled: list extensions by state
//! - outdated: compare installed versions with the registry
//! - info: show metadata for one extension
//! - search: query the registry
//! - install / uninstall / reinstall / update: change what is installed
//! - enable / disable: change what is enabled

pub mod info;
pub mod install;
pub mod list;
pub mod outdated;
pub mod reinstall;
pub mod search;
pub mod toggle;
pub mod uninstall;
pub mod update;
