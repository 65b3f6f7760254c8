//! Score-based rejection decisions.
//!
//! The decider turns one lookup into a [`ScoreOutcome`] by asking the shared
//! [`ScoreStore`] for the target's aggregate. The store applies the decay
//! formula, so a returned sum always means the limit was exceeded.

use std::sync::Arc;

use rbl_store::{ScoreQuery, ScoreStore, StoreError, decay_score};
use tracing::debug;

use crate::protocol::Response;

pub(crate) const DECISION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::decision");

/// Result of one scoring lookup.
#[derive(Debug)]
pub(crate) enum ScoreOutcome {
    /// The decay score exceeded the limit. Carries the raw victim score sum.
    Rejected(i64),
    /// No evidence, or not enough of it.
    Clear,
    /// The backend could not answer.
    Failed(StoreError),
}

impl From<&ScoreOutcome> for Response {
    fn from(outcome: &ScoreOutcome) -> Self {
        match outcome {
            ScoreOutcome::Rejected(_) => Self::Reject,
            ScoreOutcome::Clear => Self::NotFound,
            ScoreOutcome::Failed(_) => Self::Error,
        }
    }
}

/// Decides whether a target should be rejected.
///
/// One decider is shared by every session; it holds no per-request state.
pub(crate) struct ScoreDecider {
    store: Arc<dyn ScoreStore>,
}

impl ScoreDecider {
    pub(crate) fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Looks `target` up over the last `interval` days against `limit`.
    ///
    /// Backend errors are returned as [`ScoreOutcome::Failed`] and never
    /// retried.
    pub(crate) fn decide(&self, target: &str, interval: u32, limit: f64) -> ScoreOutcome {
        let query = ScoreQuery::new(target, interval, limit);
        debug!(
            target: DECISION_TARGET,
            client = query.target(),
            interval_days = query.interval_days(),
            decay_interval = query.decay_interval(),
            threshold = query.threshold(),
            "running score query"
        );
        match self.store.aggregate(&query) {
            Ok(Some(sum)) => {
                // Sums are counts of victims and stay far below 2^53.
                let score = decay_score(sum as f64, f64::from(interval));
                debug!(
                    target: DECISION_TARGET,
                    client = query.target(),
                    sum,
                    score,
                    "score exceeds limit"
                );
                ScoreOutcome::Rejected(sum)
            }
            Ok(None) => ScoreOutcome::Clear,
            Err(error) => ScoreOutcome::Failed(error),
        }
    }
}
