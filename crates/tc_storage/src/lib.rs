pub mod error;
pub mod value;

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
pub use error::Error;
use tc_conversation::{Conversation, ConversationId, ConversationSummary, ConversationsMetadata};
use tracing::{trace, warn};

use crate::{
    error::Result,
    value::{read_json, write_json},
};

pub const DEFAULT_STORAGE_DIR: &str = "conversation_history";
pub const METADATA_FILE: &str = "metadata.json";
const CONVERSATION_FILE_PREFIX: &str = "conversation_";
const CONVERSATION_FILE_SUFFIX: &str = ".json";

/// A directory of JSON conversation files.
///
/// Each conversation is stored as `conversation_<id>.json`. Messages are
/// stored with their visible content and reasoning in separate fields, and are
/// loaded back as-is.
#[derive(Debug)]
pub struct Storage {
    /// The path to the storage directory.
    root: PathBuf,
}

impl Storage {
    /// Opens the storage directory at `root`, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root: PathBuf = root.into();
        if root.exists() {
            if !root.is_dir() {
                return Err(Error::NotDir(root));
            }
        } else {
            fs::create_dir_all(&root)?;
            trace!(path = %root.display(), "Created storage directory.");
        }

        Ok(Self { root })
    }

    /// Returns the path to the storage directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the file that stores the given conversation.
    #[must_use]
    pub fn conversation_path(&self, id: &ConversationId) -> PathBuf {
        self.root.join(format!(
            "{CONVERSATION_FILE_PREFIX}{id}{CONVERSATION_FILE_SUFFIX}"
        ))
    }

    /// Saves the conversation, updating its `last_updated` timestamp.
    pub fn save_conversation(&self, conversation: &mut Conversation) -> Result<()> {
        conversation.last_updated = Utc::now();

        let path = self.conversation_path(&conversation.id);
        trace!(
            path = %path.display(),
            messages = conversation.messages.len(),
            "Persisting conversation."
        );

        write_json(&path, conversation)
    }

    /// Loads a conversation.
    ///
    /// Returns `None` if the conversation was never saved.
    pub fn load_conversation(&self, id: &ConversationId) -> Result<Option<Conversation>> {
        let path = self.conversation_path(id);
        trace!(path = %path.display(), "Loading conversation.");

        if !path.is_file() {
            return Ok(None);
        }

        read_json(&path).map(Some)
    }

    /// Lists all stored conversations, most recently updated first.
    ///
    /// Files that cannot be read are skipped.
    pub fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        trace!(path = %self.root.display(), "Listing conversations.");

        let mut conversations = vec![];
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || !is_conversation_file(&path) {
                continue;
            }

            match read_json::<Conversation>(&path) {
                Ok(conversation) => conversations.push(conversation.summary()),
                Err(error) => {
                    warn!(path = %path.display(), %error, "Failed to read conversation file. Skipping.");
                }
            }
        }

        conversations.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(conversations)
    }

    /// Deletes a conversation.
    ///
    /// Returns `false` if the conversation was never saved.
    pub fn delete_conversation(&self, id: &ConversationId) -> Result<bool> {
        let path = self.conversation_path(id);
        if !path.is_file() {
            return Ok(false);
        }

        trace!(path = %path.display(), "Removing conversation.");
        fs::remove_file(&path)?;
        Ok(true)
    }

    /// Loads the conversations metadata from storage.
    ///
    /// If the file does not exist, return default conversations metadata.
    pub fn load_metadata(&self) -> Result<ConversationsMetadata> {
        let path = self.root.join(METADATA_FILE);
        trace!(path = %path.display(), "Loading conversations metadata.");

        if !path.exists() {
            return Ok(ConversationsMetadata::default());
        }

        read_json(&path)
    }

    pub fn persist_metadata(&self, metadata: &ConversationsMetadata) -> Result<()> {
        let path = self.root.join(METADATA_FILE);
        trace!(path = %path.display(), "Persisting conversations metadata.");

        write_json(&path, metadata)
    }
}

fn is_conversation_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|v| v.to_str())
        .is_some_and(|name| {
            name.starts_with(CONVERSATION_FILE_PREFIX) && name.ends_with(CONVERSATION_FILE_SUFFIX)
        })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
