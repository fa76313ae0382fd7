//! # Interactive Practice Chat
//!
//! File: cli/src/commands/chat/mod.rs
//!
//! ## Overview
//!
//! `coach chat` runs a practice interview in the terminal. Messages go to the
//! configured response provider (the local rule engine by default, or a
//! remote endpoint when enabled) and replies appear after a simulated typing
//! delay.
//!
//! ## Examples
//!
//! ```bash
//! # Practice with the defaults
//! coach chat
//!
//! # Reproducible question order, replies shown immediately
//! coach chat --seed 42 --no-delay
//!
//! # Talk to a running `coach srv`
//! coach chat --remote http://127.0.0.1:8000/chat
//! ```
//!
use crate::core::config::{self, Config};
use crate::core::error::{CoachError, Result};
use crate::dialogue::SeededRandom;
use crate::provider;
use clap::Parser;
use std::path::Path;
use tracing::info;

pub mod repl;
pub mod transcript;
pub mod typing;

pub use repl::ChatShell;
pub use typing::TypingDelay;

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Show replies immediately instead of simulating typing.
    #[arg(long)]
    pub no_delay: bool,

    /// Seed for question selection, for a reproducible session.
    #[arg(long, env = "COACH_SEED")]
    pub seed: Option<u64>,

    /// Send messages to this chat endpoint (enables the remote provider).
    #[arg(long, value_name = "URL")]
    pub remote: Option<String>,

    /// Clear-history endpoint used with --remote.
    #[arg(long, value_name = "URL", requires = "remote")]
    pub remote_clear: Option<String>,
}

impl ChatArgs {
    /// Applies command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if self.no_delay {
            config.chat.typing_delay = false;
        }
        if let Some(url) = &self.remote {
            config.remote.enabled = true;
            config.remote.endpoint = url.clone();
        }
        if let Some(url) = &self.remote_clear {
            config.remote.clear_endpoint = url.clone();
        }
    }
}

pub async fn handle_chat(args: ChatArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let mut config = config::load_config(config_path)?;
    args.apply(&mut config);
    for url in [&args.remote, &args.remote_clear].into_iter().flatten() {
        reqwest::Url::parse(url)
            .map_err(|e| CoachError::ArgumentParsing(format!("Invalid remote URL '{url}': {e}")))?;
    }

    let rng = match args.seed {
        Some(seed) => SeededRandom::with_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let provider = provider::from_config(&config, rng)?;
    let shell = ChatShell::new(provider, TypingDelay::from_config(&config.chat));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell.run(stdin, std::io::stdout()).await
}
