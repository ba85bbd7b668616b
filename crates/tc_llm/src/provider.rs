pub mod mock;
pub mod ollama;

use std::{fmt, pin::Pin};

use async_trait::async_trait;
use futures::Stream;
use tc_conversation::Message;
use tracing::{debug, warn};

use crate::error::Result;

/// The raw text fragments of a streamed response, in arrival order.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// A request for a streamed chat response.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// The name of the model to use.
    pub model: String,

    /// The conversation history, oldest first.
    ///
    /// Only the visible content of each message is sent to the model.
    pub messages: Vec<Message>,

    pub temperature: Option<f32>,
}

impl ChatRequest {
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
pub trait Provider: fmt::Debug + Send + Sync {
    /// Get a list of available model names.
    async fn models(&self) -> Result<Vec<String>>;

    /// Start a streaming chat response.
    ///
    /// The returned stream yields the raw text, reasoning markers included.
    async fn chat_stream(&self, request: &ChatRequest) -> Result<FragmentStream>;
}

/// List the models the user can pick from.
///
/// The `default` model is always part of the list. If the backend cannot be
/// reached, the list only contains the default.
pub async fn available_models(provider: &dyn Provider, default: &str) -> Vec<String> {
    let mut models = match provider.models().await {
        Ok(models) => models,
        Err(error) => {
            warn!(%error, "Unable to list models, using the default model only.");
            vec![]
        }
    };

    if !models.iter().any(|name| name == default) {
        models.insert(0, default.to_owned());
    }

    debug!(count = models.len(), "Available models.");
    models
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
