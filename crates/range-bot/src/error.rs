//! Error types for bot operations
//!
//! These are operational failures (NLU unreachable, bad configuration,
//! session store trouble). Rejected range updates are not errors at this
//! level; they are ordinary replies.

use thiserror::Error;

/// Bot specific errors
#[derive(Debug, Error)]
pub enum BotError {
    /// Classification through the NLU service failed
    #[error("NLU error: {0}")]
    Nlu(#[from] range_nlu::NluError),

    /// Session store failure
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid REPL command
    #[error("Command error: {0}")]
    Command(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;
