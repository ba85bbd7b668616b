//! Mock provider for testing without a running backend.
//!
//! The [`MockProvider`] replays a scripted list of fragments, and can be told
//! to end the stream with an error, or to never end it at all.

use async_trait::async_trait;
use futures::{StreamExt as _, stream};

use super::{ChatRequest, FragmentStream, Provider};
use crate::error::{Error, Result};

/// How the scripted stream ends, after all fragments are yielded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MockEnd {
    #[default]
    Completed,

    /// Yield a stream error with the given message.
    Error(String),

    /// Never end the stream.
    Pending,
}

/// A mock provider for testing.
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Fragments to return from the stream.
    fragments: Vec<String>,

    end: MockEnd,

    /// Models to list, or `None` if the backend is unreachable.
    models: Option<Vec<String>>,
}

impl MockProvider {
    /// Create a new mock provider that streams the given fragments.
    #[must_use]
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            end: MockEnd::default(),
            models: Some(vec!["mock-model".to_owned()]),
        }
    }

    /// End the stream with an error after the last fragment.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.end = MockEnd::Error(message.into());
        self
    }

    /// Keep the stream open after the last fragment.
    #[must_use]
    pub fn with_pending_end(mut self) -> Self {
        self.end = MockEnd::Pending;
        self
    }

    #[must_use]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = Some(models);
        self
    }

    /// Fail to list models, as if the backend was down.
    #[must_use]
    pub fn unreachable(mut self) -> Self {
        self.models = None;
        self
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn models(&self) -> Result<Vec<String>> {
        self.models
            .clone()
            .ok_or_else(|| Error::Unavailable("mock backend is unreachable".to_owned()))
    }

    async fn chat_stream(&self, _request: &ChatRequest) -> Result<FragmentStream> {
        let fragments = stream::iter(self.fragments.clone().into_iter().map(Ok));

        let stream: FragmentStream = match self.end.clone() {
            MockEnd::Completed => Box::pin(fragments),
            MockEnd::Error(message) => Box::pin(
                fragments.chain(stream::once(async move { Err(Error::Stream(message)) })),
            ),
            MockEnd::Pending => Box::pin(fragments.chain(stream::pending())),
        };

        Ok(stream)
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
