//! # Transcript Export
//!
//! File: cli/src/commands/chat/transcript.rs
//!
//! ## Overview
//!
//! Transcript export: the session history as pretty-printed JSON.
//!
use crate::core::error::{CoachError, Result};
use crate::dialogue::Message;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn save(path: &Path, history: &[Message]) -> Result<()> {
    if history.is_empty() {
        return Err(CoachError::Transcript("nothing to save yet".to_string()).into());
    }
    let json = serde_json::to_string_pretty(history).context("Failed to serialize transcript")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write transcript: {}", path.display()))?;
    info!("Saved {} messages to {}", history.len(), path.display());
    Ok(())
}

/// Reads a transcript written by [`save`].
#[cfg(test)]
pub(crate) fn load(path: &Path) -> Result<Vec<Message>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse transcript: {}", path.display()))
}
