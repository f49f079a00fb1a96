//! Common test utilities for gext-extensions
//!
//! - Fixtures that lay out an extensions directory in a temp dir
//! - Mock registry, installer and reload trigger that record their calls
//! - A `TestEnv` wiring them into an `ExtensionManager`

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
