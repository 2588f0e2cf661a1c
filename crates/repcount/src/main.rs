mod commands;
mod config;
mod messages;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::debug;

use repcount_core::ExerciseParser;
use repcount_db::Database;
use repcount_llm::{resolve_completer, CompleterConfig, LlmParser};
use repcount_logging::{init_tracing, LogFormat};

use crate::commands::{Reply, ReplyKind};
use crate::config::{AppConfig, CONFIG_FILE_NAME};

#[derive(Parser, Debug)]
#[command(
    name = "repcount",
    about = "Record workout sets from short Ukrainian phrases",
    version,
    author
)]
struct Cli {
    /// Config file (default: ./repcount.toml, optional)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (default: ~/.local/share/repcount/repcount.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// User the sessions belong to (default: $USER)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "compact")]
    log_format: LogFormatChoice,

    /// Skip the completion model and use rule-based parsing only
    #[arg(long, global = true)]
    no_llm: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a phrase without recording it
    Parse {
        /// The phrase, e.g. "жим лежачи 10 разів 80 кг"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a workout session
    Start,

    /// Record a set in the active session
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Finish the active session and show its summary
    Stop,

    /// Show the last finished session
    Last,

    /// Show workout statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_format.into());

    let config = load_config(&cli)?;
    let user_id = config.user_id(cli.user.as_deref());
    debug!(user_id = %user_id, "Resolved user");

    match cli.command {
        Command::Parse { ref text, json } => {
            let text = text.join(" ");
            let parser = build_parser(&config, cli.no_llm).await;
            let report = commands::parse(&parser, &text).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_reply(&commands::parse_reply(&report, &text));
                if report.record.is_some() {
                    println!("{}", format!("({})", report.source).dimmed());
                }
            }
        }
        Command::Start => {
            let db = open_database(&cli, &config)?;
            print_reply(&commands::start(&db, &user_id)?);
        }
        Command::Add { ref text } => {
            let text = text.join(" ");
            let db = open_database(&cli, &config)?;
            let parser = build_parser(&config, cli.no_llm).await;
            print_reply(&commands::add(&db, &parser, &user_id, &text).await?);
        }
        Command::Stop => {
            let db = open_database(&cli, &config)?;
            print_reply(&commands::stop(&db, &user_id)?);
        }
        Command::Last => {
            let db = open_database(&cli, &config)?;
            print_reply(&commands::last(&db, &user_id)?);
        }
        Command::Stats { json } => {
            let db = open_database(&cli, &config)?;
            let (stats, reply) = commands::stats(&db, &user_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_reply(&reply);
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    match AppConfig::load(&path)? {
        Some(config) => {
            debug!(path = %path.display(), "Loaded config");
            Ok(config)
        }
        None if cli.config.is_some() => {
            anyhow::bail!("Config file not found: {}", path.display())
        }
        None => Ok(AppConfig::default()),
    }
}

fn open_database(cli: &Cli, config: &AppConfig) -> Result<Database> {
    let path = config
        .database_path(cli.db.as_deref())
        .unwrap_or_else(Database::default_path);
    debug!(path = %path.display(), "Opening database");

    Database::open_at(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

/// Resolve the completion model once and wrap it in the parsing pipeline.
async fn build_parser(config: &AppConfig, no_llm: bool) -> ExerciseParser {
    if no_llm || !config.llm.enabled {
        debug!("LLM parsing disabled");
        return ExerciseParser::new(LlmParser::disabled());
    }

    let completer_config = CompleterConfig::default().with_timeout(config.llm.timeout());
    let api_key = config.llm.api_key();
    let completer =
        resolve_completer(api_key.as_deref(), &config.llm.models, &completer_config).await;

    ExerciseParser::new(LlmParser::new(completer, completer_config))
}

fn print_reply(reply: &Reply) {
    let mut lines = reply.lines.iter();
    if let Some(first) = lines.next() {
        match reply.kind {
            ReplyKind::Success => println!("{}", first.green().bold()),
            ReplyKind::Info => println!("{}", first.bold()),
            ReplyKind::Warning => println!("{}", first.yellow()),
        }
    }
    for line in lines {
        println!("{}", line);
    }
}
