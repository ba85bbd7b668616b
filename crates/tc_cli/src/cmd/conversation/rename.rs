use crossterm::style::Stylize as _;
use tc_conversation::ConversationId;

use crate::{cmd::Output, ctx::Ctx};

#[derive(Debug, clap::Args)]
pub(crate) struct Rename {
    /// The new name of the conversation.
    name: String,

    /// Conversation ID to rename.
    ///
    /// Defaults to the active conversation if not specified.
    id: Option<ConversationId>,
}

impl Rename {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty.".into());
        }

        let mut conversation = ctx.conversation(self.id)?.with_name(Some(self.name));
        ctx.save_conversation(&mut conversation)?;

        Ok(format!(
            "Renamed conversation {} to {}",
            conversation.id.to_string().bold().yellow(),
            conversation.display_name().bold()
        )
        .into())
    }
}
