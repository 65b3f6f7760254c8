//! Error types for request line parsing.

use thiserror::Error;

/// Reasons a request line could not become a [`super::Command`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line contains a broken percent escape.
    #[error("malformed request: {message}")]
    Malformed { message: String },

    /// The line does not start with a recognised verb.
    #[error("requested unknown action")]
    UnknownAction,
}

impl ParseError {
    /// Creates a malformed request error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a malformed request error for an escape at `offset`.
    pub fn invalid_escape(offset: usize) -> Self {
        Self::malformed(format!("invalid percent escape at byte {offset}"))
    }
}
