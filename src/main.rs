mod cli;

use anyhow::Result;
use chat_reset::config::ResetConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chat-reset", version, about = "Reset the chat app database")]
struct Cli {
    /// Config file (defaults to ~/.chat-reset/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Delete all messages and users and restart autoincrement counters
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Print the reset report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the database and chat tables if missing
    Init,
    /// Show row counts and autoincrement counters
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ResetConfig::load_from(path)?,
        None => ResetConfig::load()?,
    };
    if let Some(db) = cli.db {
        config.storage.db_path = db;
    }

    // Log to stderr so stdout only carries the status line.
    let filter =
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Reset { yes, json } => cli::reset::reset(&config, yes, json)?,
        Command::Init => cli::init::init(&config)?,
        Command::Status { json } => cli::status::status(&config, json)?,
    }

    Ok(())
}
