//! Parsing and validation of `quire.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a strongly-typed
//! [`QuireConfig`]: where the symbol metadata and documentation live, how
//! near-miss suggestions are computed, and which diagnostics are denied or allowed.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
