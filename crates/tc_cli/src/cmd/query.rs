use tc_conversation::{Conversation, Message};
use tc_llm::TurnEnd;
use tracing::{debug, warn};

use super::{
    Output, Success,
    turn::{TurnArgs, respond},
};
use crate::ctx::Ctx;

#[derive(Debug, clap::Args)]
pub(crate) struct Query {
    /// The query to send.
    #[arg(required = true)]
    query: Vec<String>,

    /// Start a new conversation without any message history.
    #[arg(short = 'n', long = "new")]
    new_conversation: bool,

    /// Name the conversation.
    #[arg(long)]
    name: Option<String>,

    #[command(flatten)]
    turn: TurnArgs,
}

impl Query {
    pub(crate) async fn run(self, ctx: &mut Ctx) -> Output {
        let query = self.query.join(" ");
        if query.trim().is_empty() {
            return Err("Query cannot be empty.".into());
        }

        let mut conversation = if self.new_conversation {
            let conversation = Conversation::default().with_name(self.name);
            ctx.set_active_conversation_id(conversation.id)?;
            conversation
        } else {
            let conversation = ctx.active_conversation()?;
            match self.name {
                Some(name) => conversation.with_name(Some(name)),
                None => conversation,
            }
        };

        debug!(id = %conversation.id, "Querying assistant.");
        conversation.push(Message::user(query));

        let result = respond(ctx, &mut conversation, &self.turn).await;

        // The question, and any partial answer, are kept regardless of how the
        // turn ended.
        ctx.save_conversation(&mut conversation)?;

        match result? {
            TurnEnd::Completed => Ok(Success::Ok),
            TurnEnd::Cancelled => Ok("Response interrupted.".into()),
            TurnEnd::Failed(error) => {
                warn!(%error, "Response failed, partial answer saved.");
                Err(error.into())
            }
        }
    }
}
