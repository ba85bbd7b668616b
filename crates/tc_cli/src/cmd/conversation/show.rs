use comfy_table::{Cell, Row};
use crossterm::style::Stylize as _;
use serde_json::json;
use tc_conversation::{Conversation, ConversationId};
use tc_term::format_message;

use crate::{
    cmd::{Output, Success},
    ctx::Ctx,
};

#[derive(Debug, clap::Args)]
pub(crate) struct Show {
    /// Conversation ID to show.
    ///
    /// Defaults to the active conversation if not specified.
    id: Option<ConversationId>,

    /// Do not display the reasoning content.
    #[arg(long = "hide-reasoning")]
    hide_reasoning: bool,

    /// Show the conversation details instead of its messages.
    #[arg(long, conflicts_with = "hide_reasoning")]
    info: bool,
}

impl Show {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        let conversation = ctx.conversation(self.id)?;

        if self.info {
            let active = conversation.id == ctx.active_conversation_id();
            return Ok(details(&conversation, active));
        }

        if !ctx.term.is_tty {
            return Ok(Success::Json(json!({
                "id": conversation.id.to_string(),
                "name": conversation.name,
                "last_updated": conversation.last_updated.to_rfc3339(),
                "messages": conversation.messages,
            })));
        }

        let policy = ctx.reasoning_policy(self.hide_reasoning);
        let messages = conversation
            .messages
            .iter()
            .map(|message| format_message(message, &policy, false))
            .collect::<Vec<_>>();

        if messages.is_empty() {
            return Ok(format!("{} has no messages.", conversation.display_name()).into());
        }

        Ok(messages.join("\n\n").into())
    }
}

fn details(conversation: &Conversation, active: bool) -> Success {
    let mut title = conversation.display_name().bold().to_string();
    if active {
        title.push_str(&format!(" {}", "(active)".yellow()));
    }

    let rows = [
        ("ID", conversation.id.to_string()),
        ("Messages", conversation.messages.len().to_string()),
        ("Last updated", conversation.last_updated.to_rfc3339()),
    ]
    .into_iter()
    .map(|(key, value)| {
        let mut row = Row::new();
        row.add_cell(Cell::new(key));
        row.add_cell(Cell::new(value));
        row
    })
    .collect();

    Success::Details {
        title: Some(title),
        rows,
    }
}
