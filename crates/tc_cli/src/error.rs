use std::io;

use crate::cmd;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// CLI Error types
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Command error: {0}")]
    Command(#[from] cmd::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] tc_config::Error),

    #[error("Conversation error: {0}")]
    Conversation(#[from] tc_conversation::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] tc_storage::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] tc_llm::Error),

    #[error("Render error: {0}")]
    Term(#[from] tc_term::Error),

    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Prompt error: {0}")]
    Inquire(#[from] inquire::error::InquireError),
}
