//! See [`Message`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tc_split::Split;

/// The author of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        })
    }
}

/// A single message in a conversation.
///
/// The visible answer and the reasoning are stored separately. Neither field
/// contains reasoning markers, and loading a message never splits it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,

    /// The visible content of the message.
    #[serde(default)]
    pub content: String,

    /// The reasoning that preceded the content, if any.
    ///
    /// An empty string is loaded as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_reasoning"
    )]
    pub reasoning: Option<String>,

    /// When the message was created.
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message with the current timestamp.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            reasoning: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Build an assistant message from a finalized stream split.
    ///
    /// Reasoning is kept as-is if any reasoning span was seen and it is not
    /// empty. Whether it is long enough to be shown is decided when rendering,
    /// see [`ReasoningPolicy`].
    ///
    /// [`ReasoningPolicy`]: crate::ReasoningPolicy
    #[must_use]
    pub fn assistant_from_split(split: Split) -> Self {
        let Split {
            visible,
            reasoning,
            had_reasoning,
        } = split;

        Self::assistant(visible)
            .with_reasoning((had_reasoning && !reasoning.is_empty()).then_some(reasoning))
    }

    /// Attach reasoning to the message.
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: Option<String>) -> Self {
        self.reasoning = reasoning.filter(|v| !v.is_empty());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<DateTime<Utc>>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Returns `true` if the message carries reasoning.
    #[must_use]
    pub fn has_reasoning(&self) -> bool {
        self.reasoning.is_some()
    }

    #[must_use]
    pub const fn is_assistant(&self) -> bool {
        matches!(self.role, Role::Assistant)
    }
}

fn deserialize_reasoning<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| v.filter(|v| !v.is_empty()))
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
