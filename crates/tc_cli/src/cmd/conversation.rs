use super::Output;
use crate::ctx::Ctx;

mod clear;
mod ls;
mod new;
mod rename;
mod rm;
mod show;
mod use_;

#[derive(Debug, clap::Args)]
pub(crate) struct Conversation {
    #[command(subcommand)]
    command: Commands,
}

impl Conversation {
    pub(crate) fn run(self, ctx: &mut Ctx) -> Output {
        match self.command {
            Commands::List(args) => args.run(ctx),
            Commands::Show(args) => args.run(ctx),
            Commands::New(args) => args.run(ctx),
            Commands::Use(args) => args.run(ctx),
            Commands::Remove(args) => args.run(ctx),
            Commands::Rename(args) => args.run(ctx),
            Commands::Clear(args) => args.run(ctx),
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List conversations.
    #[command(name = "ls")]
    List(ls::Ls),

    /// Show the messages of a conversation.
    #[command(name = "show")]
    Show(show::Show),

    /// Start a new, empty conversation.
    #[command(name = "new")]
    New(new::New),

    /// Set the active conversation.
    #[command(name = "use")]
    Use(use_::Use),

    /// Remove a conversation.
    #[command(name = "rm")]
    Remove(rm::Rm),

    /// Rename a conversation.
    #[command(name = "rename")]
    Rename(rename::Rename),

    /// Remove all messages of a conversation.
    #[command(name = "clear")]
    Clear(clear::Clear),
}
