//! Error types for the evidence store.

use std::path::PathBuf;
use std::time::SystemTimeError;

use thiserror::Error;

/// Errors surfaced by [`crate::ScoreStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened.
    #[error("failed to open sqlite database at {path}: {source}")]
    Open {
        /// Database location.
        path: PathBuf,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// Connection pragmas or SQL functions could not be installed.
    #[error("failed to configure sqlite connection: {source}")]
    Configure {
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// The schema could not be created.
    #[error("failed to apply evidence schema: {source}")]
    Migrate {
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// The aggregate query failed for a reason other than "no row".
    #[error("score query failed: {source}")]
    Query {
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// Inserting evidence failed.
    #[error("failed to record spam evidence: {source}")]
    Record {
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// The evidence timestamp precedes the Unix epoch or overflows.
    #[error("evidence timestamp is out of range")]
    Timestamp {
        /// Clock error, when the timestamp precedes the epoch.
        #[source]
        source: Option<SystemTimeError>,
    },
    /// A session panicked while holding the connection lock.
    #[error("sqlite connection lock poisoned")]
    Poisoned,
}
