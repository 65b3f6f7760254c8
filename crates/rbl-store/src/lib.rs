//! Spam evidence storage for the RBL policy-check daemon.
//!
//! The daemon asks a single question of its persistence layer: "has this
//! client accumulated enough recent spam evidence to be rejected?". The
//! [`ScoreStore`] trait captures that question as one aggregate query so the
//! protocol core can be exercised against test doubles, while
//! [`SqliteScoreStore`] answers it from an SQLite database.
//!
//! Scores decay exponentially: a client whose victim scores sum to `s` over
//! the last `interval` days scores `1 - e^(-s / interval)`, see
//! [`decay_score`].

mod decay;
mod error;
mod query;
mod sqlite;

use std::sync::Arc;

pub use decay::decay_score;
pub use error::StoreError;
pub use query::ScoreQuery;
pub use sqlite::SqliteScoreStore;

const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::sqlite");

/// Backend able to answer scoring queries.
///
/// Implementations are shared by every connection session and must tolerate
/// concurrent calls.
pub trait ScoreStore: Send + Sync {
    /// Sums the victim scores recorded for `query.target()` inside the
    /// window.
    ///
    /// Returns `Ok(Some(sum))` only when the decay score of that sum exceeds
    /// the query threshold, and `Ok(None)` when there is no matching row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot run the query.
    fn aggregate(&self, query: &ScoreQuery) -> Result<Option<i64>, StoreError>;
}

impl<T> ScoreStore for Arc<T>
where
    T: ScoreStore + ?Sized,
{
    fn aggregate(&self, query: &ScoreQuery) -> Result<Option<i64>, StoreError> {
        (**self).aggregate(query)
    }
}
