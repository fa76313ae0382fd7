//! # Coach CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests: a handle on the compiled
//! `coach` binary and an in-process chat server on an ephemeral port.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

use coach::commands::srv::routes::{self, SessionStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// # Get Coach Command (`coach_cmd`)
///
/// An `assert_cmd::Command` for the `coach` binary built for this test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn coach_cmd() -> Command {
    Command::cargo_bin("coach").expect("Failed to find coach binary for testing")
}

/// An empty configuration file, so tests never pick up the user's settings.
pub fn isolated_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir for config");
    let path = dir.path().join("coach.toml");
    std::fs::write(&path, "").expect("Failed to write empty config");
    (dir, path)
}

/// Serves the chat API on 127.0.0.1 and returns its address and sessions.
pub async fn spawn_chat_server(seed: u64) -> (SocketAddr, Arc<SessionStore>) {
    let sessions = Arc::new(SessionStore::new(Some(seed)));
    let app = routes::router(sessions.clone());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Test server has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    (addr, sessions)
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    listener.local_addr().expect("Probe listener has no address")
}
