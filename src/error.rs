//! Error types for the ttt-sarsa crate

use thiserror::Error;

/// Main error type for the ttt-sarsa crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal action: position {position} {reason}")]
    IllegalAction { position: usize, reason: String },

    #[error("game already over")]
    GameOver,

    #[error("no legal actions available in state '{state}'")]
    EmptyLegalActions { state: String },

    #[error("game is not finished after {moves} moves")]
    UnfinishedGame { moves: usize },

    #[error("invalid board '{input}': {reason}")]
    InvalidBoard { input: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    pub(crate) fn out_of_bounds(position: usize) -> Self {
        Error::IllegalAction {
            position,
            reason: "is out of bounds (must be 0-8)".to_string(),
        }
    }

    pub(crate) fn occupied(position: usize) -> Self {
        Error::IllegalAction {
            position,
            reason: "is already occupied".to_string(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
