//! # Remote Response Provider
//!
//! File: cli/src/provider/remote.rs
//!
//! ## Overview
//!
//! Remote provider: delegates each message to an HTTP chat endpoint.
//!
//! The endpoint receives `message=<text>` as a form post and answers
//! `{"response": "..."}`; the clear endpoint answers `{"success": true}`.
//! `coach srv` speaks exactly this protocol. Any transport error, non-2xx
//! status, malformed body or timeout is logged and the message is answered
//! by the local controller instead, so the user always gets a reply.
//!
use super::{LocalProvider, ResponseProvider};
use crate::core::config::RemoteConfig;
use crate::core::error::{CoachError, Result};
use crate::dialogue::{RandomSource, SessionContext};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the session key understood by `coach srv`.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ClearReply {
    success: bool,
}

/// HTTP side of the provider.
#[derive(Debug, Clone)]
struct Endpoint {
    client: reqwest::Client,
    endpoint: String,
    clear_endpoint: String,
    session_id: String,
}

pub struct RemoteProvider<R> {
    remote: Endpoint,
    fallback: LocalProvider<R>,
}

impl<R: RandomSource> RemoteProvider<R> {
    pub fn new(config: &RemoteConfig, fallback: LocalProvider<R>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for remote provider")?;
        Ok(Self {
            remote: Endpoint {
                client,
                endpoint: config.endpoint.clone(),
                clear_endpoint: config.clear_endpoint.clone(),
                session_id: format!(
                    "cli-{}-{}",
                    std::process::id(),
                    chrono::Utc::now().timestamp_millis()
                ),
            },
            fallback,
        })
    }

    /// Value sent in the `x-session-id` header.
    pub fn session_id(&self) -> &str {
        &self.remote.session_id
    }
}

impl Endpoint {
    async fn request(&self, input: &str) -> std::result::Result<String, CoachError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(SESSION_HEADER, &self.session_id)
            .form(&[("message", input)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::RemoteStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let reply: ChatReply = response.json().await?;
        if reply.response.trim().is_empty() {
            return Err(CoachError::RemoteEmptyReply {
                url: self.endpoint.clone(),
            });
        }
        Ok(reply.response)
    }

    async fn clear(&self) -> std::result::Result<(), CoachError> {
        let response = self
            .client
            .post(&self.clear_endpoint)
            .header(SESSION_HEADER, &self.session_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::RemoteStatus {
                url: self.clear_endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let reply: ClearReply = response.json().await?;
        if !reply.success {
            return Err(CoachError::RemoteClearRejected {
                url: self.clear_endpoint.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R: RandomSource + Send> ResponseProvider for RemoteProvider<R> {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn welcome(&mut self) -> String {
        self.fallback.welcome().await
    }

    async fn respond(&mut self, input: &str) -> String {
        match self.remote.request(input).await {
            Ok(reply) => {
                debug!(endpoint = %self.remote.endpoint, "remote reply received");
                self.fallback.record_exchange(input, &reply);
                reply
            }
            Err(e) => {
                warn!("Remote provider failed, answering locally: {}", e);
                self.fallback.respond(input).await
            }
        }
    }

    async fn reset(&mut self) -> String {
        if let Err(e) = self.remote.clear().await {
            warn!("Could not clear remote history: {}", e);
        }
        self.fallback.reset().await
    }

    fn context(&self) -> &SessionContext {
        self.fallback.context()
    }
}
