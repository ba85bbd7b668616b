//! Ollama API configuration.

use schematic::Config;
use url::Url;

use crate::error::Result;

/// Ollama API configuration.
#[derive(Debug, Clone, PartialEq, Config)]
#[config(rename_all = "snake_case")]
pub struct OllamaConfig {
    /// The base URL to use for API requests.
    #[setting(default = "http://localhost:11434", env = "THINKCHAT_OLLAMA_BASE_URL")]
    pub base_url: String,
}

impl OllamaConfig {
    /// The parsed base URL.
    pub fn url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(Into::into)
    }
}
