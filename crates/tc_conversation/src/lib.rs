pub mod conversation;
pub mod error;
pub mod message;
pub mod reasoning;

pub use conversation::{Conversation, ConversationId, ConversationSummary, ConversationsMetadata};
pub use error::Error;
pub use message::{Message, Role};
pub use reasoning::ReasoningPolicy;
