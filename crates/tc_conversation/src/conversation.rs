//! Defines the Conversation structure.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, message::Message};

/// A named sequence of messages between the user and the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// The unique ID of the conversation.
    pub id: ConversationId,

    /// The optional name of the conversation.
    #[serde(default)]
    pub name: Option<String>,

    /// The last time the conversation was saved.
    #[serde(default)]
    pub last_updated: DateTime<Utc>,

    /// The messages, oldest first.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            id: ConversationId::new(),
            name: None,
            last_updated: Utc::now(),
            messages: vec![],
        }
    }
}

impl Conversation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().with_name(Some(name.into()))
    }

    /// Set the name, ignoring blank names.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|v| !v.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove all messages, keeping the ID and name.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The name to show for this conversation.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }

    #[must_use]
    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id,
            name: self.name.clone(),
            last_updated: self.last_updated,
            message_count: self.messages.len(),
        }
    }
}

/// The listing details of a stored conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub name: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub message_count: usize,
}

/// ID wrapper for Conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(Uuid);

impl ConversationId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for ConversationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds metadata about all conversations, like the current active
/// conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationsMetadata {
    /// The ID of the currently active conversation.
    ///
    /// The conversation itself might not be stored yet.
    pub active_conversation_id: ConversationId,
}

impl ConversationsMetadata {
    #[must_use]
    pub fn new(active_conversation_id: ConversationId) -> Self {
        Self {
            active_conversation_id,
        }
    }
}

impl Default for ConversationsMetadata {
    fn default() -> Self {
        Self::new(ConversationId::default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use test_log::test;

    use super::*;

    #[test]
    fn test_conversation_id_round_trip() {
        let id = ConversationId::new();
        let parsed = id.to_string().parse::<ConversationId>().unwrap();

        assert_eq!(parsed, id);
    }

    #[test]
    fn test_conversation_id_rejects_garbage() {
        assert!(matches!(
            "not-a-uuid".parse::<ConversationId>(),
            Err(Error::InvalidId(_))
        ));
    }

    #[test]
    fn test_blank_names_are_ignored() {
        assert_eq!(Conversation::default().with_name(Some("  ".into())).name, None);
        assert_eq!(Conversation::new("Rust").display_name(), "Rust");
        assert_eq!(Conversation::default().display_name(), "(unnamed)");
    }

    #[test]
    fn test_summary() {
        let mut conversation = Conversation::new("Numbers");
        conversation.last_updated = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        conversation.push(Message::user("What is 6 * 7?"));
        conversation.push(Message::assistant("42"));

        let summary = conversation.summary();
        assert_eq!(summary.id, conversation.id);
        assert_eq!(summary.name.as_deref(), Some("Numbers"));
        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.last_updated, conversation.last_updated);
    }

    #[test]
    fn test_conversation_serialization() {
        let id = "01890a5d-ac96-774b-bcce-b302099a8057"
            .parse::<ConversationId>()
            .unwrap();
        let timestamp = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let conversation = Conversation {
            id,
            name: Some("Greeting".into()),
            last_updated: timestamp,
            messages: vec![Message::user("hello").with_timestamp(timestamp)],
        };

        insta::assert_json_snapshot!(conversation, @r#"
        {
          "id": "01890a5d-ac96-774b-bcce-b302099a8057",
          "name": "Greeting",
          "last_updated": "2023-01-01T00:00:00Z",
          "messages": [
            {
              "role": "user",
              "content": "hello",
              "timestamp": "2023-01-01T00:00:00Z"
            }
          ]
        }
        "#);
    }
}
