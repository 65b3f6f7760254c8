use thiserror::Error;

use crate::defaults::{DEFAULT_SCORE_INTERVAL, DEFAULT_SCORE_LIMIT};

/// Validated scoring parameters handed to the decider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreConfig {
    interval: u32,
    limit: f64,
}

impl ScoreConfig {
    /// Validates raw scoring values.
    ///
    /// A zero `interval` or `limit` means "unset" and falls back to 60 days
    /// and 0.22 respectively. Any other limit must lie strictly between 0 and 1.
    pub fn new(interval: u32, limit: f64) -> Result<Self, ScoreConfigError> {
        let interval = if interval == 0 {
            DEFAULT_SCORE_INTERVAL
        } else {
            interval
        };
        let limit = if limit == 0.0 { DEFAULT_SCORE_LIMIT } else { limit };
        if !limit.is_finite() || limit <= 0.0 || limit >= 1.0 {
            return Err(ScoreConfigError::LimitOutOfRange { limit });
        }
        Ok(Self { interval, limit })
    }

    /// Scoring window in days, also used as the decay denominator.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Decay score above which a target is rejected.
    #[must_use]
    pub fn limit(&self) -> f64 {
        self.limit
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SCORE_INTERVAL,
            limit: DEFAULT_SCORE_LIMIT,
        }
    }
}

/// Errors raised while validating scoring parameters.
#[derive(Debug, Error)]
pub enum ScoreConfigError {
    /// The limit cannot be compared against a decay score.
    #[error("score limit {limit} must lie strictly between 0 and 1")]
    LimitOutOfRange {
        /// Rejected limit.
        limit: f64,
    },
}
