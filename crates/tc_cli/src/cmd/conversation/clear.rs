use crossterm::style::Stylize as _;
use tc_conversation::ConversationId;

use crate::{cmd::Output, ctx::Ctx};

#[derive(Debug, clap::Args)]
pub(crate) struct Clear {
    /// Conversation ID to clear.
    ///
    /// Defaults to the active conversation if not specified.
    id: Option<ConversationId>,
}

impl Clear {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        let mut conversation = ctx.conversation(self.id)?;
        let count = conversation.messages.len();

        conversation.clear();
        ctx.save_conversation(&mut conversation)?;

        Ok(format!(
            "Removed {count} message(s) from conversation {}",
            conversation.id.to_string().bold().yellow()
        )
        .into())
    }
}
