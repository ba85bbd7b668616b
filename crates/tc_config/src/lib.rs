//! Layered application configuration.
//!
//! Values are resolved from the built-in defaults, then an optional TOML
//! file, then `THINKCHAT_*` environment variables.

pub mod error;
pub mod model;
pub mod ollama;
pub mod reasoning;
pub mod storage;

use std::path::Path;

pub use error::Error;
use schematic::{Config, ConfigLoader};
use tracing::{debug, trace};

pub use crate::{
    model::{ModelConfig, PartialModelConfig},
    ollama::{OllamaConfig, PartialOllamaConfig},
    reasoning::{DelimitersConfig, PartialDelimitersConfig, PartialReasoningConfig, ReasoningConfig},
    storage::{PartialStorageConfig, StorageConfig},
};
use crate::error::Result;

/// The name of the configuration file inside the storage directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Config)]
#[config(rename_all = "snake_case")]
pub struct AppConfig {
    #[setting(nested)]
    pub ollama: OllamaConfig,

    #[setting(nested)]
    pub model: ModelConfig,

    #[setting(nested)]
    pub reasoning: ReasoningConfig,

    #[setting(nested)]
    pub delimiters: DelimitersConfig,

    #[setting(nested)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Check the values that cannot be expressed by the types alone.
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.delimiters.delimiters()?;
        self.ollama.url()?;

        Ok(())
    }
}

/// Load the configuration, reading the TOML file at `path`.
///
/// If `optional` is `true`, a missing file is ignored.
pub fn load(path: &Path, optional: bool) -> Result<AppConfig> {
    let mut loader = ConfigLoader::<AppConfig>::new();

    trace!(path = %path.display(), optional, "Trying to open configuration file.");
    if optional {
        loader.file_optional(path)?;
    } else {
        loader.file(path)?;
    }

    let config = loader.load()?.config;
    debug!("Loaded configuration.");
    trace!(?config, "Configuration details.");

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
