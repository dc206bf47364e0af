#![allow(clippy::must_use_candidate)]

pub mod codes;
mod env;
mod loader;
pub mod log;

use serde::Deserialize;

pub use codes::CodeOverride;
pub use env::ExpandError;
pub use log::{LogConfig, LogFormat};

/// Top-level faultline configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log output configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Status and message overrides layered over the fixed code table
    #[serde(default)]
    pub codes: Vec<CodeOverride>,
}
