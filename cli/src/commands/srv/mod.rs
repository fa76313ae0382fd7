//! # Interview Coach Chat Server
//!
//! File: cli/src/commands/srv/mod.rs
//!
//! ## Overview
//!
//! `coach srv` exposes the dialogue engine over HTTP so a browser chat page
//! (or `coach chat --remote`) can hold practice sessions. It provides:
//! - The chat API (`/chat`, `/chat/init`, `/clear-chat-history`, `/chat/state`)
//! - Per-client sessions keyed by the `x-session-id` header
//! - Optional static file serving for the chat page
//! - CORS and port fallback if the requested port is in use
//!
//! ## Architecture
//!
//! - `config.rs`: Argument parsing and merging with the `[server]` section
//! - `routes.rs`: Chat handlers and the session table
//! - `server_logic.rs`: Router assembly, binding and shutdown
//! - `utils.rs`: Helpers for the startup banner
//!
//! ## Examples
//!
//! ```bash
//! # API only, on the default port
//! coach srv
//!
//! # Serve a chat page and accept connections from the network
//! coach srv --host 0.0.0.0 --port 9000 --static-dir ./site
//! ```
//!
use crate::core::config as core_config;
use crate::core::error::Result;
use std::path::Path;
use tracing::info;

pub use config::SrvArgs;

pub mod config;
pub mod routes;
pub mod server_logic;
pub mod utils;

/// # Handle Server Command (`handle_srv`)
///
/// Loads the configuration, applies the command-line overrides and runs the
/// server until shutdown.
pub async fn handle_srv(args: SrvArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let loaded = core_config::load_config(config_path)?;
    let effective = config::ServerConfig::resolve(&args, &loaded).await?;
    info!("Effective server config: {:?}", effective);

    server_logic::run_server(effective).await
}
