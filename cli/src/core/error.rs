//! # Coach Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used by the ambient layers of the
//! coach: configuration loading, the remote response provider, the HTTP
//! server and transcript export. The dialogue engine itself never fails;
//! every turn produces a reply, so nothing in `dialogue` returns these.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `CoachError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if config.chat.chars_per_second == 0 {
//!     return Err(CoachError::Config("chars_per_second must be positive".into()))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the coach application.
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remote provider request failed: {source}")]
    Remote {
        #[from]
        source: reqwest::Error,
    },

    #[error("Remote provider returned status {status} from {url}")]
    RemoteStatus { url: String, status: u16 },

    #[error("Remote provider returned an empty reply from {url}")]
    RemoteEmptyReply { url: String },

    #[error("Remote provider rejected the request to clear history at {url}")]
    RemoteClearRejected { url: String },

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = CoachError::Config("chars_per_second must be positive".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: chars_per_second must be positive"
        );

        let status = CoachError::RemoteStatus {
            url: "http://localhost:8000/chat".into(),
            status: 502,
        };
        assert_eq!(
            status.to_string(),
            "Remote provider returned status 502 from http://localhost:8000/chat"
        );

        let clear = CoachError::RemoteClearRejected {
            url: "http://localhost:8000/clear-chat-history".into(),
        };
        assert!(clear.to_string().contains("clear history"));
    }
}
