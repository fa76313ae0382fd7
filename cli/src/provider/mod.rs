//! # Response Providers
//!
//! File: cli/src/provider/mod.rs
//!
//! ## Overview
//!
//! A response provider turns one user message into one reply. Front ends (the
//! terminal chat shell) talk to a `Box<dyn ResponseProvider>` and never know
//! where the reply came from.
//!
//! - `local`: Answers with the in-process dialogue controller
//! - `remote`: Posts to a remote chat endpoint, falling back to the local
//!   controller on any failure or timeout
//!
//! Which one is used is decided by `[remote] enabled` in the configuration.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::dialogue::{RandomSource, SessionContext};
use async_trait::async_trait;
use tracing::info;

pub mod local;
pub mod remote;

pub use local::LocalProvider;
pub use remote::RemoteProvider;

#[async_trait]
pub trait ResponseProvider: Send {
    /// Short label for logs and the chat banner.
    fn name(&self) -> &'static str;

    /// Starts the session and returns the welcome message.
    async fn welcome(&mut self) -> String;

    /// Reply to one message. Always non-empty.
    async fn respond(&mut self, input: &str) -> String;

    /// Discards the conversation and returns a fresh welcome message.
    async fn reset(&mut self) -> String;

    /// The locally held session state.
    fn context(&self) -> &SessionContext;
}

/// Builds the provider selected by `config.remote.enabled`.
pub fn from_config<R>(config: &Config, rng: R) -> Result<Box<dyn ResponseProvider>>
where
    R: RandomSource + Send + 'static,
{
    let local = LocalProvider::new(rng);
    if config.remote.enabled {
        info!("Using remote response provider at {}", config.remote.endpoint);
        Ok(Box::new(RemoteProvider::new(&config.remote, local)?))
    } else {
        info!("Using local response provider.");
        Ok(Box::new(local))
    }
}
