use crossterm::style::Stylize as _;
use tc_conversation::Conversation;

use crate::{cmd::Output, ctx::Ctx};

#[derive(Debug, clap::Args)]
pub(crate) struct New {
    /// Name of the new conversation.
    #[arg(long)]
    name: Option<String>,
}

impl New {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        let mut conversation = Conversation::default().with_name(self.name);
        ctx.save_conversation(&mut conversation)?;
        ctx.set_active_conversation_id(conversation.id)?;

        Ok(format!(
            "Started conversation {}",
            conversation.id.to_string().bold().yellow()
        )
        .into())
    }
}
