//! Error types for connection sessions.

use std::io;

use thiserror::Error;

/// Transport failures that end a session early.
///
/// Parse and backend failures are answered on the wire and never surface
/// here.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read from client: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("failed to write response: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
    #[error("request line exceeds {limit} bytes")]
    LineTooLong { limit: usize },
}
