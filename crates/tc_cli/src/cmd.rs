mod chat;
mod conversation;
mod models;
mod query;
mod turn;

use std::{
    fmt,
    num::{NonZeroI32, NonZeroU8},
};

use comfy_table::Row;
use serde_json::Value;

use crate::Ctx;

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Commands {
    /// Ask the assistant a question.
    #[command(visible_alias = "q")]
    Query(query::Query),

    /// Chat with the assistant, one prompt per line.
    Chat(chat::Chat),

    /// List the available models.
    Models(models::Models),

    /// Manage conversations.
    #[command(visible_alias = "c", alias = "conversations")]
    Conversation(conversation::Conversation),
}

impl Commands {
    pub(crate) async fn run(self, ctx: &mut Ctx) -> Output {
        match self {
            Commands::Query(args) => args.run(ctx).await,
            Commands::Chat(args) => args.run(ctx).await,
            Commands::Models(args) => args.run(ctx).await,
            Commands::Conversation(args) => args.run(ctx),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Commands::Query(_) => "query",
            Commands::Chat(_) => "chat",
            Commands::Models(_) => "models",
            Commands::Conversation(_) => "conversation",
        }
    }
}

pub(crate) type Output = std::result::Result<Success, Error>;

/// The type of output that should be printed to the screen.
#[derive(Debug)]
pub(crate) enum Success {
    /// The command was successful.
    Ok,

    /// Single message to be printed to the screen.
    Message(String),

    /// List of details to be printed in a table.
    Table { header: Row, rows: Vec<Row> },

    /// Details of a single item to be printed.
    Details {
        title: Option<String>,
        rows: Vec<Row>,
    },

    /// JSON value to be printed.
    Json(Value),
}

impl From<()> for Success {
    fn from(_value: ()) -> Self {
        Self::Ok
    }
}

impl From<String> for Success {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for Success {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<Value> for Success {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) struct Error {
    /// The error code.
    ///
    /// Used to exit the CLI with a specific exit code. This is usually `1`.
    pub(super) code: NonZeroI32,

    /// The optional error message to be displayed to the user.
    pub(super) message: Option<String>,

    /// Metadata to be displayed to the user.
    pub(super) metadata: Vec<(String, Value)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.as_deref().unwrap_or_default())
    }
}

impl From<i32> for Error {
    fn from(code: i32) -> Self {
        Self {
            code: code.try_into().unwrap_or_else(|_| failure()),
            message: None,
            metadata: vec![],
        }
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        (1, error).into()
    }
}

impl From<&str> for Error {
    fn from(error: &str) -> Self {
        error.to_owned().into()
    }
}

impl From<(i32, String)> for Error {
    fn from((code, message): (i32, String)) -> Self {
        (code, message, vec![]).into()
    }
}

impl From<(i32, String, Vec<(String, Value)>)> for Error {
    fn from((code, message, metadata): (i32, String, Vec<(String, Value)>)) -> Self {
        Self {
            code: code.try_into().unwrap_or_else(|_| failure()),
            message: Some(message),
            metadata,
        }
    }
}

impl From<Vec<(&'static str, String)>> for Error {
    fn from(mut metadata: Vec<(&'static str, String)>) -> Self {
        let message = metadata
            .iter()
            .position(|(k, _)| *k == "message")
            .map(|i| metadata.remove(i).1)
            .unwrap_or_else(|| "Application error".to_owned());

        let metadata = metadata
            .into_iter()
            .map(|(k, v)| (k.to_owned(), Value::String(v)))
            .collect();

        (1, message, metadata).into()
    }
}

impl From<crate::error::Error> for Error {
    fn from(error: crate::error::Error) -> Self {
        use crate::error::Error::*;

        match error {
            Command(error) => error,
            Config(error) => error.into(),
            Conversation(error) => error.into(),
            Storage(error) => error.into(),
            Llm(error) => error.into(),
            Term(error) => error.into(),
            Io(error) => error.into(),
            Inquire(error) => error.into(),
            NotFound(target, id) => vec![
                ("message", format!("Not found - {target} {id}")),
                ("target", target.to_owned()),
                ("id", id),
            ]
            .into(),
        }
    }
}

/// The default exit code of a failed command.
fn failure() -> NonZeroI32 {
    NonZeroI32::from(NonZeroU8::MIN)
}

/// The error message, formatted as `<kind> - <message>`, and its causes.
fn with_cause(
    mut error: &dyn std::error::Error,
    kind: impl fmt::Display,
) -> Vec<(&'static str, String)> {
    let mut causes = vec![("message", format!("{kind} - {error}"))];
    while let Some(cause) = error.source() {
        error = cause;
        causes.push(("cause", error.to_string()));
    }

    causes
}

macro_rules! impl_from_error {
    ($error:ty, $message:expr) => {
        impl From<$error> for Error {
            fn from(error: $error) -> Self {
                with_cause(&error, $message).into()
            }
        }
    };
}

impl_from_error!(inquire::error::InquireError, "Prompt error");
impl_from_error!(std::io::Error, "IO error");
impl_from_error!(tc_config::Error, "Configuration error");
impl_from_error!(tc_conversation::Error, "Conversation error");
impl_from_error!(tc_storage::Error, "Storage error");
impl_from_error!(tc_term::Error, "Render error");

impl From<tc_llm::Error> for Error {
    fn from(error: tc_llm::Error) -> Self {
        use tc_llm::Error::*;

        let kind = match &error {
            Ollama(_) | Unavailable(_) => "Backend error",
            Stream(_) => "Stream error",
            Url(_) => "Configuration error",
            Split(_) => "Splitter error",
        };

        with_cause(&error, kind).into()
    }
}
