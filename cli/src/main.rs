//! # Coach Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `coach` CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Practice in the terminal
//! coach chat
//!
//! # Run the chat server with request logging
//! coach -v srv --port 9000
//!
//! # Use a specific configuration file
//! coach --config ./coach.toml chat
//! ```
//!
use clap::Parser;
use coach::commands;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "coach",
    about = "💬 Coach: practice job interviews with a rule-based interviewer",
    long_about = "Run mock interviews in the terminal or serve them to a browser chat page.\n\
                  Questions cover behavioral, technical, personal and situational topics,\n\
                  with feedback on every answer and an overall summary at the end.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of the user and project files.
    #[arg(long, value_name = "PATH", global = true, env = "COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Practice interview in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Serve the chat API (and optionally the chat page) over HTTP.
    #[command(alias = "s")]
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let config_path = cli.config.as_deref();
    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, config_path).await,
        Commands::Srv(args) => commands::srv::handle_srv(args, config_path).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
