//! # Chat HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//!
//! ## Overview
//!
//! This module runs the HTTP front end for the interview coach:
//! - The chat API from [`super::routes`]
//! - Optional static file serving for the chat page
//! - Port availability checking with automatic fallback
//! - CORS configuration
//! - Graceful shutdown handling
//!
//! ## Architecture
//!
//! 1. Find an available port if the requested one is in use
//! 2. Build the Axum router with the chat routes and middleware
//! 3. Start the server with graceful shutdown handlers
//! 4. Display connection information
//!
use super::config::ServerConfig;
use super::routes::{self, SessionStore};
use super::utils;
use crate::core::error::{CoachError, Result};
use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Binds to the first free port starting at `config.port`, prints the
/// connection details and serves until Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// - No available port within the allowed attempts.
/// - The listener cannot be bound.
/// - The server stops with a fatal error.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let sessions = Arc::new(SessionStore::with_limits(
        config.seed,
        config.max_sessions,
        config.session_idle,
    ));
    let app = create_app(&config, sessions);

    println!("\n=================================================================");
    println!("💬 Interview coach chat server");
    for url in utils::display_urls(addr, utils::get_local_ip()) {
        println!("🌐 URL:               {url}");
    }
    println!("⚙️  Binding to address: {addr}");
    match &config.static_dir {
        Some(dir) => println!("📂 Chat page from:    {}", dir.display()),
        None => println!("📂 Chat page:         none (API only)"),
    }
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!(
        "🗂️  Sessions:          up to {}, dropped after {}s idle",
        config.max_sessions,
        config.session_idle.as_secs()
    );
    println!("=================================================================\n");

    info!("Starting chat server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoachError::Server(e.to_string()))?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and the ports after it, up to `max_attempts` in total.
///
/// ## Errors
///
/// Returns an error if every attempted port is taken.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// The chat routes, plus the static directory for every other path when
/// one is configured, wrapped in tracing and CORS middleware.
pub fn create_app(config: &ServerConfig, sessions: routes::SharedSessions) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut app = routes::router(sessions);
    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}
