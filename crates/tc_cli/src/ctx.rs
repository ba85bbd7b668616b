use std::io::{self, IsTerminal as _};

use tc_config::AppConfig;
use tc_conversation::{Conversation, ConversationId, ConversationsMetadata, ReasoningPolicy};
use tc_llm::{Provider, provider::ollama::Ollama};
use tc_storage::Storage;
use tc_term::{BufferedRenderer, Renderer, TerminalRenderer};
use tracing::{info, trace};

use crate::{Error, Globals, Result};

/// Context for the CLI application
pub(crate) struct Ctx {
    pub(crate) storage: Storage,

    /// Merged file/environment configuration.
    config: AppConfig,

    pub(crate) term: Term,

    metadata: ConversationsMetadata,
}

pub(crate) struct Term {
    /// Global CLI arguments.
    pub(crate) args: Globals,

    /// Whether or not stdout is connected to a TTY.
    ///
    /// If you pipe (|) or redirect (>) the output, stdout is connected to a
    /// pipe or a regular file, respectively. These are not managed by the TTY
    /// subsystem.
    pub(crate) is_tty: bool,
}

impl Ctx {
    pub(crate) fn new(storage: Storage, args: Globals, config: AppConfig) -> Result<Self> {
        let metadata = storage.load_metadata()?;
        let ctx = Self {
            storage,
            config,
            term: Term {
                args,
                is_tty: io::stdout().is_terminal(),
            },
            metadata,
        };

        // Pin the active conversation, so that the next run continues it.
        ctx.persist_metadata()?;

        Ok(ctx)
    }

    /// Get immutable access to the configuration.
    pub(crate) fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether modified state is written to disk.
    pub(crate) fn persist(&self) -> bool {
        self.term.args.persist
    }

    /// Whether conversations are saved after every turn.
    pub(crate) fn autosave(&self) -> bool {
        self.persist() && self.config.storage.autosave
    }

    pub(crate) fn active_conversation_id(&self) -> ConversationId {
        self.metadata.active_conversation_id
    }

    pub(crate) fn set_active_conversation_id(&mut self, id: ConversationId) -> Result<()> {
        info!(%id, "Setting active conversation.");
        self.metadata.active_conversation_id = id;
        self.persist_metadata()
    }

    /// The active conversation, which is empty if it was never saved.
    pub(crate) fn active_conversation(&self) -> Result<Conversation> {
        let id = self.active_conversation_id();

        Ok(self
            .storage
            .load_conversation(&id)?
            .unwrap_or_else(|| Conversation {
                id,
                ..Conversation::default()
            }))
    }

    /// Load a stored conversation, or the active one if `id` is `None`.
    pub(crate) fn conversation(&self, id: Option<ConversationId>) -> Result<Conversation> {
        match id {
            None => self.active_conversation(),
            Some(id) => self
                .storage
                .load_conversation(&id)?
                .ok_or_else(|| Error::NotFound("conversation", id.to_string())),
        }
    }

    pub(crate) fn save_conversation(&self, conversation: &mut Conversation) -> Result<()> {
        if !self.persist() {
            trace!(id = %conversation.id, "Persistence disabled, not saving conversation.");
            return Ok(());
        }

        self.storage
            .save_conversation(conversation)
            .map_err(Into::into)
    }

    /// Remove a stored conversation, returning whether a file was removed.
    pub(crate) fn delete_conversation(&self, id: &ConversationId) -> Result<bool> {
        if !self.persist() {
            trace!(%id, "Persistence disabled, not removing conversation.");
            return Ok(false);
        }

        self.storage.delete_conversation(id).map_err(Into::into)
    }

    /// The configured reasoning policy, hidden if `hide` is set.
    pub(crate) fn reasoning_policy(&self, hide: bool) -> ReasoningPolicy {
        if hide {
            return ReasoningPolicy::hidden();
        }

        self.config.reasoning.policy()
    }

    pub(crate) fn provider(&self) -> Result<Box<dyn Provider>> {
        Ok(Box::new(Ollama::try_from(&self.config.ollama)?))
    }

    /// Renders live output on a terminal, and only the final message otherwise.
    pub(crate) fn renderer(&self, policy: ReasoningPolicy) -> Box<dyn Renderer> {
        if self.term.is_tty {
            Box::new(TerminalRenderer::stdout(policy))
        } else {
            Box::new(BufferedRenderer::stdout(policy))
        }
    }

    fn persist_metadata(&self) -> Result<()> {
        if !self.persist() {
            return Ok(());
        }

        self.storage
            .persist_metadata(&self.metadata)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use camino_tempfile::{Utf8TempDir, tempdir};
    use pretty_assertions::assert_eq;
    use tc_conversation::Message;
    use test_log::test;

    use super::*;

    fn ctx(persist: bool) -> (Utf8TempDir, Ctx) {
        let tmp = tempdir().unwrap();
        let storage = Storage::new(tmp.path().join("history")).unwrap();
        let config = tc_config::load(tmp.path().join("missing.toml").as_std_path(), true).unwrap();
        let args = Globals {
            config: None,
            storage: None,
            verbose: 0,
            quiet: false,
            persist,
        };

        (tmp, Ctx::new(storage, args, config).unwrap())
    }

    #[test]
    fn test_active_conversation_is_empty_until_saved() {
        let (_tmp, ctx) = ctx(true);

        let mut conversation = ctx.active_conversation().unwrap();
        assert_eq!(conversation.id, ctx.active_conversation_id());
        assert!(conversation.is_empty());

        conversation.push(Message::user("Hello"));
        ctx.save_conversation(&mut conversation).unwrap();

        assert_eq!(ctx.active_conversation().unwrap().messages.len(), 1);
    }

    #[test]
    fn test_unknown_conversation_is_not_found() {
        let (_tmp, ctx) = ctx(true);

        assert_matches!(
            ctx.conversation(Some(ConversationId::new())),
            Err(Error::NotFound("conversation", _))
        );
    }

    #[test]
    fn test_active_conversation_survives_restart() {
        let (tmp, mut ctx) = ctx(true);
        let id = ConversationId::new();
        ctx.set_active_conversation_id(id).unwrap();

        let storage = Storage::new(tmp.path().join("history")).unwrap();
        assert_eq!(storage.load_metadata().unwrap().active_conversation_id, id);
    }

    #[test]
    fn test_no_persist_writes_nothing() {
        let (tmp, mut ctx) = ctx(false);

        let mut conversation = ctx.active_conversation().unwrap();
        conversation.push(Message::user("Hello"));
        ctx.save_conversation(&mut conversation).unwrap();
        ctx.set_active_conversation_id(ConversationId::new()).unwrap();

        let storage = Storage::new(tmp.path().join("history")).unwrap();
        assert!(storage.list_conversations().unwrap().is_empty());
        assert!(!tmp.path().join("history").join("metadata.json").exists());
    }

    #[test]
    fn test_no_persist_keeps_deleted_conversation() {
        let (tmp, ctx) = ctx(false);

        let storage = Storage::new(tmp.path().join("history")).unwrap();
        let mut conversation = ctx.active_conversation().unwrap();
        conversation.push(Message::user("Hello"));
        storage.save_conversation(&mut conversation).unwrap();

        assert!(!ctx.delete_conversation(&conversation.id).unwrap());
        assert!(storage.load_conversation(&conversation.id).unwrap().is_some());
    }

    #[test]
    fn test_delete_conversation() {
        let (_tmp, ctx) = ctx(true);

        let mut conversation = ctx.active_conversation().unwrap();
        conversation.push(Message::user("Hello"));
        ctx.save_conversation(&mut conversation).unwrap();

        assert!(ctx.delete_conversation(&conversation.id).unwrap());
        assert_matches!(ctx.conversation(Some(conversation.id)), Err(Error::NotFound(..)));
    }
}
