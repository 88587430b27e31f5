//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Validation failures are deliberately not represented here: they are
/// recoverable in place and travel as [`ValidationErrors`] inside a
/// [`SubmitOutcome`], never across the transport boundary.
///
/// [`ValidationErrors`]: crate::domain::ValidationErrors
/// [`SubmitOutcome`]: crate::services::SubmitOutcome
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
