/// Parameters for one scoring lookup.
///
/// The window length and the decay denominator are always the same number of
/// days; they are carried separately because the query binds them as two
/// distinct parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreQuery {
    target: String,
    interval_days: u32,
    decay_interval: u32,
    threshold: f64,
}

impl ScoreQuery {
    /// Builds a query for `target` over `interval_days` with the given
    /// rejection threshold.
    #[must_use]
    pub fn new(target: impl Into<String>, interval_days: u32, threshold: f64) -> Self {
        Self {
            target: target.into(),
            interval_days,
            decay_interval: interval_days,
            threshold,
        }
    }

    /// Normalised identifier being looked up.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Length of the evidence window in days.
    #[must_use]
    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    /// Denominator of the decay formula.
    #[must_use]
    pub fn decay_interval(&self) -> u32 {
        self.decay_interval
    }

    /// Decay score the aggregate must exceed.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
