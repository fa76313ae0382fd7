//! # Coach Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level command groups of the `coach` CLI. Each group defines its
//! own argument struct and an async handler called from `main.rs`.
//!
//! ## Command Groups
//!
//! - `chat`: Practice interview in the terminal
//! - `srv`: HTTP chat server for the browser page and remote clients
//!

/// Interactive terminal chat. Includes the shell, typing delay and transcript export.
pub mod chat;
/// HTTP chat server. Includes configuration, routes and server logic.
pub mod srv;
