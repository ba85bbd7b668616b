use std::io::{self, Write as _};

use crossterm::style::Stylize as _;
use inquire::Confirm;
use tc_conversation::ConversationId;
use tracing::debug;

use crate::{cmd::Output, ctx::Ctx};

#[derive(Debug, clap::Args)]
pub(crate) struct Rm {
    /// Conversation ID to remove.
    ///
    /// Defaults to the active conversation if not specified.
    id: Option<ConversationId>,

    /// Do not prompt for confirmation.
    #[arg(long)]
    yes: bool,
}

impl Rm {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        let active_id = ctx.active_conversation_id();
        let id = self.id.unwrap_or(active_id);
        let id_fmt = id.to_string().bold().yellow();

        let conversation = ctx.conversation(Some(id))?;

        if !self.yes {
            if !ctx.term.is_tty {
                return Err("Refusing to remove a conversation without --yes.".into());
            }

            writeln!(
                io::stdout(),
                "Removing conversation {id_fmt} ({}, {} message(s))\n",
                conversation.display_name().bold(),
                conversation.messages.len()
            )?;

            let confirm = Confirm::new("Are you sure?")
                .with_default(false)
                .with_help_message("this action cannot be undone");

            match confirm.prompt() {
                Ok(true) => {}
                Ok(false) | Err(_) => return Err(1.into()),
            }
        }

        if !ctx.delete_conversation(&id)? {
            debug!(%id, "Conversation file not removed.");
        }

        // Never leave a removed conversation active.
        if id == active_id {
            ctx.set_active_conversation_id(ConversationId::new())?;
        }

        Ok(format!("Removed conversation {id_fmt}").into())
    }
}
