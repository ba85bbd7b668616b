use std::str::FromStr as _;

use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt as _;
use ollama_rs::{
    Ollama as Client,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    models::ModelOptions,
};
use tc_config::OllamaConfig;
use tc_conversation::{Message, Role};
use tracing::{debug, trace};
use url::Url;

use super::{ChatRequest, FragmentStream, Provider};
use crate::error::{Error, Result};

const DEFAULT_PORT: u16 = 11434;

#[derive(Debug, Clone)]
pub struct Ollama {
    client: Client,
}

#[async_trait]
impl Provider for Ollama {
    async fn models(&self) -> Result<Vec<String>> {
        let models = self.client.list_local_models().await?;

        Ok(models.into_iter().map(|model| model.name).collect())
    }

    async fn chat_stream(&self, request: &ChatRequest) -> Result<FragmentStream> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            temperature = request.temperature,
            "Starting Ollama chat stream."
        );

        let mut stream = self
            .client
            .send_chat_messages_stream(create_request(request))
            .await?;

        Ok(Box::pin(try_stream!({
            while let Some(chunk) = stream.next().await {
                let response = chunk
                    .map_err(|error| Error::Stream(format!("Ollama stream failed: {error:?}")))?;

                if !response.message.content.is_empty() {
                    yield response.message.content;
                }

                if response.done {
                    trace!("Ollama reported end of response.");
                    break;
                }
            }
        })))
    }
}

fn create_request(request: &ChatRequest) -> ChatMessageRequest {
    let mut chat =
        ChatMessageRequest::new(request.model.clone(), convert_messages(&request.messages));

    if let Some(temperature) = request.temperature {
        chat = chat.options(ModelOptions::default().temperature(temperature));
    }

    chat
}

/// Convert the history to Ollama messages.
///
/// Reasoning is never sent back to the model.
fn convert_messages(messages: &[Message]) -> Vec<ChatMessage> {
    messages
        .iter()
        .map(|message| match message.role {
            Role::System => ChatMessage::system(message.content.clone()),
            Role::User => ChatMessage::user(message.content.clone()),
            Role::Assistant => ChatMessage::assistant(message.content.clone()),
        })
        .collect()
}

impl TryFrom<&OllamaConfig> for Ollama {
    type Error = Error;

    fn try_from(config: &OllamaConfig) -> Result<Self> {
        let url = Url::from_str(&config.base_url)?;
        let port = url.port().unwrap_or(DEFAULT_PORT);
        let client = reqwest::Client::new();

        Ok(Ollama {
            client: Client::new_with_client(url, port, client),
        })
    }
}

#[cfg(test)]
mod tests {
    use ollama_rs::generation::chat::MessageRole;
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn test_convert_messages_drops_reasoning() {
        let messages = vec![
            Message::system("Be brief."),
            Message::user("What is 6 * 7?"),
            Message::assistant("42").with_reasoning(Some("Six sevens.".to_owned())),
        ];

        let converted = convert_messages(&messages);

        assert_eq!(converted.len(), 3);
        assert!(matches!(converted[0].role, MessageRole::System));
        assert!(matches!(converted[1].role, MessageRole::User));
        assert!(matches!(converted[2].role, MessageRole::Assistant));
        assert_eq!(converted[2].content, "42");
    }

    #[test]
    fn test_try_from_config() {
        let config = OllamaConfig {
            base_url: "http://localhost:11434".to_owned(),
        };
        assert!(Ollama::try_from(&config).is_ok());

        let config = OllamaConfig {
            base_url: "not a url".to_owned(),
        };
        assert!(matches!(Ollama::try_from(&config), Err(Error::Url(_))));
    }
}
