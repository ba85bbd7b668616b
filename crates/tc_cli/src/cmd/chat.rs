use std::io::{self, Write as _};

use crossterm::style::Stylize as _;
use tc_conversation::{Conversation, Message};
use tc_llm::TurnEnd;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::{debug, info};

use super::{
    Error, Output, Success,
    turn::{TurnArgs, respond},
};
use crate::ctx::Ctx;

/// Input lines that end the chat.
const EXIT_COMMANDS: &[&str] = &["/exit", "/quit"];

#[derive(Debug, clap::Args)]
pub(crate) struct Chat {
    /// Start a new conversation without any message history.
    #[arg(short = 'n', long = "new")]
    new_conversation: bool,

    /// Name the conversation.
    #[arg(long, requires = "new_conversation")]
    name: Option<String>,

    #[command(flatten)]
    turn: TurnArgs,
}

impl Chat {
    pub(crate) async fn run(self, ctx: &mut Ctx) -> Output {
        let mut conversation = if self.new_conversation {
            let conversation = Conversation::default().with_name(self.name.clone());
            ctx.set_active_conversation_id(conversation.id)?;
            conversation
        } else {
            ctx.active_conversation()?
        };

        info!(id = %conversation.id, "Starting chat.");
        if ctx.term.is_tty {
            writeln!(
                io::stdout(),
                "Chatting in {}. Type {} to leave.",
                conversation.display_name().bold(),
                EXIT_COMMANDS[0].bold()
            )?;
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if ctx.term.is_tty {
                let mut stdout = io::stdout();
                write!(stdout, "\n{} ", ">".bold().cyan())?;
                stdout.flush()?;
            }

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };

            let Some(line) = line else {
                debug!("Input closed, ending chat.");
                break;
            };

            let prompt = line.trim();
            if prompt.is_empty() {
                continue;
            }

            if EXIT_COMMANDS.contains(&prompt) {
                break;
            }

            conversation.push(Message::user(prompt));
            match respond(ctx, &mut conversation, &self.turn).await {
                Ok(TurnEnd::Completed) => {}
                Ok(TurnEnd::Cancelled) => {
                    writeln!(io::stderr(), "{}", "Response interrupted.".italic())?;
                }
                Ok(TurnEnd::Failed(error)) => report(error.into())?,
                Err(error) => report(error.into())?,
            }

            if ctx.autosave() {
                ctx.save_conversation(&mut conversation)?;
            }
        }

        if !conversation.is_empty() {
            ctx.save_conversation(&mut conversation)?;
        }

        Ok(Success::Ok)
    }
}

/// Print an error of a single turn, without ending the chat.
fn report(error: Error) -> io::Result<()> {
    let message = error.message.as_deref().unwrap_or("Application error");
    writeln!(io::stderr(), "{} {message}", "Error:".red().bold())
}
