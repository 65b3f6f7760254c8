/// Exponential decay score for `sum` victim points over `interval` days.
///
/// The result lies in `[0, 1)` for non-negative sums and grows towards 1 as
/// evidence accumulates. The SQLite backend registers this function so the
/// threshold comparison happens inside the aggregate query.
#[must_use]
pub fn decay_score(sum: f64, interval: f64) -> f64 {
    1.0 - (-sum / interval).exp()
}
