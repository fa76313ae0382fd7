//! # Coach Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for the coach, handling
//! loading, merging, validation, and access to configuration data. It supports
//! a multi-level approach that combines defaults, user settings, and
//! project-specific overrides.
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config`
//! 2. Project-specific `.coach.toml` in current directory or ancestors
//! 3. User-specific `<config dir>/coach/config.toml`
//! 4. Default values defined in the code
//!
//! The project and user files are overlaid key by key: any key written in
//! the project file wins, even when it repeats the built-in default.
//!
//! Command-line flags are applied on top of the loaded configuration by the
//! individual command handlers.
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! typing_delay = true
//! base_delay_ms = 1000
//! chars_per_second = 20
//! max_delay_ms = 5000
//!
//! [remote]
//! enabled = false
//! endpoint = "http://127.0.0.1:8000/chat"
//! clear_endpoint = "http://127.0.0.1:8000/clear-chat-history"
//! timeout_secs = 10
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//! enable_cors = true
//! static_dir = "~/sites/interview"
//! max_sessions = 1000
//! session_idle_secs = 1800
//! ```
//!
use crate::core::error::{CoachError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub server: ServerSection,
}

/// Simulated typing delay applied before a reply is shown in the chat shell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Whether replies are held back at all.
    #[serde(default = "default_typing_delay")]
    pub typing_delay: bool,
    /// Fixed part of every delay.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Simulated typing speed; each reply adds `len / chars_per_second` seconds.
    #[serde(default = "default_chars_per_second")]
    pub chars_per_second: u64,
    /// Upper bound on any single delay.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

/// Remote response provider. Off unless explicitly enabled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Receives `message=<text>` as a form post, answers `{"response": "..."}`.
    #[serde(default = "default_remote_endpoint")]
    pub endpoint: String,
    /// Receives an empty post, answers `{"success": true}`.
    #[serde(default = "default_remote_clear_endpoint")]
    pub clear_endpoint: String,
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

/// Settings for `coach srv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_server_host")]
    pub host: IpAddr,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
    /// Directory holding the chat page assets (can use ~). Will be expanded.
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Most sessions kept at once; the least recently used one is dropped first.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Sessions idle for longer than this are dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_typing_delay() -> bool {
    true
}
fn default_base_delay_ms() -> u64 {
    1000
}
fn default_chars_per_second() -> u64 {
    20
}
fn default_max_delay_ms() -> u64 {
    5000
}
fn default_remote_endpoint() -> String {
    "http://127.0.0.1:8000/chat".to_string()
}
fn default_remote_clear_endpoint() -> String {
    "http://127.0.0.1:8000/clear-chat-history".to_string()
}
fn default_remote_timeout_secs() -> u64 {
    10
}
fn default_server_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_server_port() -> u16 {
    8000
}
fn default_enable_cors() -> bool {
    true
}
fn default_max_sessions() -> usize {
    1000
}
fn default_session_idle_secs() -> u64 {
    1800
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay: default_typing_delay(),
            base_delay_ms: default_base_delay_ms(),
            chars_per_second: default_chars_per_second(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_remote_endpoint(),
            clear_endpoint: default_remote_clear_endpoint(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            enable_cors: default_enable_cors(),
            static_dir: None,
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".coach.toml";

/// Loads the effective configuration.
///
/// With `explicit` set only that file is read (on top of the defaults);
/// otherwise the project file is overlaid on the user file, key by key.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut merged_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let mut layered = toml::Table::new();
            if let Some(user_table) = load_user_config()? {
                overlay_tables(&mut layered, user_table);
            }
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            if let Some(project_table) = load_project_config(&current_dir)? {
                overlay_tables(&mut layered, project_table);
            }
            table_to_config(layered).context("Failed to combine user and project configuration")?
        }
    };
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<toml::Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Coach", "coach") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            read_config_table(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<toml::Table>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        read_config_table(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.coach.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the root, stopping at the first `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads one file as a raw table, checking it against the schema on the way.
fn read_config_table(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let table: toml::Table = content
        .parse()
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    table_to_config(table.clone())
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    Ok(table)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    table_to_config(read_config_table(path)?)
}

fn table_to_config(table: toml::Table) -> Result<Config> {
    Ok(toml::Value::Table(table).try_into::<Config>()?)
}

/// Copies every key of `top` into `base`. Nested tables are merged
/// recursively, so a key written in `top` always wins and keys it does not
/// mention keep their `base` value.
fn overlay_tables(base: &mut toml::Table, top: toml::Table) {
    for (key, value) in top {
        if let toml::Value::Table(top_table) = value {
            if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                overlay_tables(base_table, top_table);
                continue;
            }
            base.insert(key, toml::Value::Table(top_table));
        } else {
            base.insert(key, value);
        }
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(dir) = config.server.static_dir.as_mut() {
        *dir = shellexpand::tilde(dir).into_owned();
        debug!("Expanded static directory: {}", dir);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.chat.chars_per_second == 0 {
        return Err(anyhow!(CoachError::Config(
            "chat.chars_per_second must be greater than zero.".to_string()
        )));
    }
    if config.chat.max_delay_ms < config.chat.base_delay_ms {
        return Err(anyhow!(CoachError::Config(format!(
            "chat.max_delay_ms ({}) must not be smaller than chat.base_delay_ms ({}).",
            config.chat.max_delay_ms, config.chat.base_delay_ms
        ))));
    }
    if config.remote.timeout_secs == 0 {
        return Err(anyhow!(CoachError::Config(
            "remote.timeout_secs must be greater than zero.".to_string()
        )));
    }
    if config.remote.enabled {
        for (key, url) in [
            ("remote.endpoint", &config.remote.endpoint),
            ("remote.clear_endpoint", &config.remote.clear_endpoint),
        ] {
            if let Err(e) = reqwest::Url::parse(url) {
                return Err(anyhow!(CoachError::Config(format!(
                    "Invalid URL for {}: '{}' ({}).",
                    key, url, e
                ))));
            }
        }
    }
    if config.server.max_sessions == 0 || config.server.session_idle_secs == 0 {
        return Err(anyhow!(CoachError::Config(
            "server.max_sessions and server.session_idle_secs must be greater than zero.".to_string()
        )));
    }
    if let Some(dir) = &config.server.static_dir {
        let path = PathBuf::from(dir);
        if !path.exists() {
            warn!("Configured static directory '{}' does not exist.", path.display());
        } else if !path.is_dir() {
            return Err(anyhow!(CoachError::Config(format!(
                "Configured static path '{}' exists but is not a directory.",
                path.display()
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
