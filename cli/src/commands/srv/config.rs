//! # Chat Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//!
//! ## Overview
//!
//! This module builds the effective server settings from:
//! 1. Command-line arguments (highest priority)
//! 2. The `[server]` section of the loaded configuration
//! 3. Default values (lowest priority)
//!
//! The static asset directory, when given, is resolved to an absolute,
//! canonical path and must exist.
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! port = 9000
//! host = "0.0.0.0"
//! enable_cors = true
//! static_dir = "site"
//! max_sessions = 200
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::net::IpAddr;
use std::time::Duration;
use std::{env, path::PathBuf};
use tracing::debug;

/// # Server Command Arguments (`SrvArgs`)
///
/// Flags left unset fall back to the `[server]` configuration section.
#[derive(Parser, Debug, Default)]
pub struct SrvArgs {
    /// Network port to listen on (default 8000).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind to. Use `0.0.0.0` to accept connections from other machines.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Directory with the chat page assets, served for every non-API path.
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,

    /// Base seed for question selection; each new session gets its own offset.
    #[arg(long, env = "COACH_SEED")]
    pub seed: Option<u64>,
}

/// # Effective Server Configuration (`ServerConfig`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
    /// Absolute path of the asset directory, if any.
    pub static_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub max_sessions: usize,
    pub session_idle: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::merge(&SrvArgs::default(), &Config::default())
    }
}

impl ServerConfig {
    /// Arguments override the configuration; nothing is validated yet.
    fn merge(args: &SrvArgs, config: &Config) -> Self {
        Self {
            port: args.port.unwrap_or(config.server.port),
            host: args.host.unwrap_or(config.server.host),
            enable_cors: config.server.enable_cors && !args.no_cors,
            static_dir: args
                .static_dir
                .clone()
                .or_else(|| config.server.static_dir.as_ref().map(PathBuf::from)),
            seed: args.seed,
            max_sessions: config.server.max_sessions,
            session_idle: Duration::from_secs(config.server.session_idle_secs),
        }
    }

    /// # Resolve Server Configuration (`resolve`)
    ///
    /// Merges `args` over `config` and validates the static directory.
    ///
    /// ## Errors
    ///
    /// Returns an error if the static directory cannot be found or is not a directory.
    pub async fn resolve(args: &SrvArgs, config: &Config) -> Result<Self> {
        let mut effective = Self::merge(args, config);
        if let Some(dir) = effective.static_dir.take() {
            effective.static_dir = Some(resolve_directory(dir).await?);
        }
        Ok(effective)
    }
}

/// Makes `dir` absolute and canonical, and checks that it is a directory.
async fn resolve_directory(dir: PathBuf) -> Result<PathBuf> {
    let absolute_path = if dir.is_absolute() {
        dir
    } else {
        env::current_dir()
            .context("Failed to get current working directory")?
            .join(dir)
    };

    let canonical_path = tokio::fs::canonicalize(&absolute_path)
        .await
        .with_context(|| {
            format!(
                "Directory '{}' could not be found or accessed",
                absolute_path.display()
            )
        })?;

    let metadata = tokio::fs::metadata(&canonical_path)
        .await
        .with_context(|| format!("Failed to get metadata for path '{}'", canonical_path.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("Path is not a directory: {}", canonical_path.display());
    }

    debug!("Resolved static directory to: {}", canonical_path.display());
    Ok(canonical_path)
}
