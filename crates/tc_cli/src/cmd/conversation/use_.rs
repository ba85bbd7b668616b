use crossterm::style::Stylize as _;
use tc_conversation::ConversationId;

use crate::{cmd::Output, ctx::Ctx};

#[derive(Debug, clap::Args)]
pub(crate) struct Use {
    /// Conversation ID to use as the active conversation.
    id: ConversationId,
}

impl Use {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        let id_fmt = self.id.to_string().bold().yellow();
        let active_id = ctx.active_conversation_id();
        if self.id == active_id {
            return Ok(format!("Already active conversation: {id_fmt}").into());
        }

        if ctx.storage.load_conversation(&self.id)?.is_none() {
            return Err((1, format!("Conversation not found: {}", id_fmt.red())).into());
        }

        ctx.set_active_conversation_id(self.id)?;

        Ok(format!(
            "Switched active conversation from {} to {id_fmt}",
            active_id.to_string().bold().grey(),
        )
        .into())
    }
}
