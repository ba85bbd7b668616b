mod cmd;
mod ctx;
pub(crate) mod error;
mod signals;

use std::{
    env, fmt,
    io::{self, IsTerminal as _, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use clap::{
    ArgAction, Parser,
    builder::{BoolValueParser, TypedValueParser as _},
};
use cmd::{Commands, Output, Success};
use comfy_table::{Cell, CellAlignment, Row};
use crossterm::style::Stylize as _;
use ctx::Ctx;
use error::{Error, Result};
use serde_json::Value;
use tc_config::{AppConfig, CONFIG_FILE, storage::STORAGE_DIR_ENV};
use tc_storage::{DEFAULT_STORAGE_DIR, Storage};
use tracing::{info, trace};

/// Chat with local reasoning models.
#[derive(Parser)]
#[command(name = "thinkchat", author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten, next_help_heading = "Global Options")]
    globals: Globals,

    #[command(subcommand, next_help_heading = "Options")]
    command: Commands,
}

#[derive(Debug, clap::Args)]
pub struct Globals {
    /// Load configuration from this TOML file.
    ///
    /// Defaults to `config.toml` in the storage directory, if it exists.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// The directory in which conversations are stored.
    #[arg(long, value_name = "DIR", global = true)]
    storage: Option<PathBuf>,

    /// Increase verbosity of logging.
    ///
    /// Can be specified multiple times to increase verbosity.
    ///
    /// Defaults to printing "error" messages. For each increase in verbosity,
    /// the log level is set to "warn", "info", "debug", and "trace"
    /// respectively.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Disable all logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Persist modified state to disk.
    ///
    /// This is enabled by default, but can be disabled to send a query to the
    /// assistant, without adding that query to the conversation history.
    #[arg(
        long = "no-persist",
        global = true,
        default_value_t = false,
        value_parser = BoolValueParser::new().map(|v| !v),
        help = "Disable persistence for the duration of the command."
    )]
    pub persist: bool,
}

impl fmt::Display for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entry(&"config", &self.globals.config)
            .entry(&"storage", &self.globals.storage)
            .entry(&"verbose", &self.globals.verbose)
            .entry(&"quiet", &self.globals.quiet)
            .entry(&"persist", &self.globals.persist)
            .finish()
    }
}

#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let is_tty = io::stdout().is_terminal();

    configure_logging(cli.globals.verbose, cli.globals.quiet);
    trace!(command = cli.command.name(), arguments = %cli, "Starting CLI run.");

    let result = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime.block_on(run_inner(cli)),
        Err(error) => Err(error.into()),
    };

    let (code, output) = match result {
        Ok(output) if is_tty => (0, output_to_string(output)),
        Ok(output) => (0, parse_json_output(output)),
        Err(error) => parse_error(error.into(), is_tty),
    };

    let written = if output.is_empty() {
        Ok(())
    } else if code == 0 {
        writeln!(io::stdout(), "{output}")
    } else {
        writeln!(io::stderr(), "{output}")
    };

    match (code, written) {
        (0, Ok(())) => ExitCode::SUCCESS,
        (0, Err(_)) => ExitCode::FAILURE,
        (code, _) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
    }
}

async fn run_inner(cli: Cli) -> Output {
    let config = load_config(&cli.globals)?;
    let root = cli
        .globals
        .storage
        .clone()
        .unwrap_or_else(|| config.storage.path());

    let storage = Storage::new(root).map_err(Error::from)?;
    info!(path = %storage.path().display(), "Using conversation storage.");

    let mut ctx = Ctx::new(storage, cli.globals, config)?;
    cli.command.run(&mut ctx).await
}

fn output_to_string(output: Success) -> String {
    match output {
        Success::Ok => String::new(),
        Success::Message(msg) => msg,
        Success::Table { header, rows } => tc_term::table::list(header, rows),
        Success::Details { title, rows } => tc_term::table::details(title.as_deref(), rows),
        Success::Json(value) => value.to_string(),
    }
}

fn parse_json_output(output: Success) -> String {
    let value = match output {
        Success::Ok => return String::new(),
        Success::Message(msg) => serde_json::json!({ "message": strip_ansi_escapes::strip_str(msg) }),
        Success::Table { header, rows } => tc_term::table::list_json(&header, rows),
        Success::Details { title, rows } => {
            let title = title.map(strip_ansi_escapes::strip_str);
            tc_term::table::details_json(title.as_deref(), rows)
        }
        Success::Json(value) => value,
    };

    serde_json::to_string(&value).unwrap_or_else(|_| value.to_string())
}

fn parse_error(error: cmd::Error, is_tty: bool) -> (i32, String) {
    let cmd::Error {
        code,
        message,
        metadata,
    } = error;

    if is_tty {
        let mut buf = format!(
            "{} {}",
            "Error:".red().bold(),
            message.as_deref().unwrap_or("Application error")
        );

        if !metadata.is_empty() {
            let rows = metadata
                .into_iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(v) => v,
                        v => v.to_string(),
                    };

                    let mut row = Row::new();
                    row.add_cell(Cell::new(k).set_alignment(CellAlignment::Right))
                        .add_cell(Cell::new(value).set_alignment(CellAlignment::Left));
                    row
                })
                .collect::<Vec<_>>();

            buf.push_str("\n\n");
            buf.push_str(&tc_term::table::details(None, rows));
        }

        return (code.into(), buf);
    }

    let error = serde_json::json!({
        "message": message.map(strip_ansi_escapes::strip_str),
        "metadata": metadata.into_iter().collect::<serde_json::Map<_, _>>(),
        "code": code,
    });

    (code.into(), error.to_string())
}

/// Load the configuration file and environment.
///
/// An explicit `--config` file must exist, the default one in the storage
/// directory is optional.
fn load_config(globals: &Globals) -> Result<AppConfig> {
    let (path, optional) = match &globals.config {
        Some(path) => (path.clone(), false),
        None => {
            let dir = globals
                .storage
                .clone()
                .or_else(|| env::var_os(STORAGE_DIR_ENV).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));

            (dir.join(CONFIG_FILE), true)
        }
    };

    tc_config::load(&path, optional).map_err(Into::into)
}

fn configure_logging(verbose: u8, quiet: bool) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;

    let mut level = match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    if quiet {
        level = LevelFilter::OFF;
    }

    let mut filter = vec!["off".to_owned()];
    for krate in ["cli", "config", "conversation", "llm", "split", "storage", "term"] {
        filter.push(format!("tc_{krate}={level}"));
    }

    let format = fmt::format().with_target(false).compact();

    if level < LevelFilter::DEBUG {
        tracing_subscriber::fmt()
            .event_format(format)
            .without_time()
            .with_ansi(true)
            .with_target(false)
            .with_writer(io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    } else {
        tracing_subscriber::fmt()
            .event_format(format)
            .with_ansi(true)
            .with_target(false)
            .with_writer(io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    }
}
