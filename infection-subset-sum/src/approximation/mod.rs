//! Fully polynomial-time approximation scheme.
//!
//! Works like the exact search but thins the frontier after every item,
//! discarding partial sums within `error / n` of a smaller kept sum. The
//! frontier stays O(n / error) long and the result is at least
//! `(1 - error)` times the optimum.
use crate::{partials::Partials, Error, Result, Solution};
use tracing::debug;

pub fn solve(weights: &[u64], target: u64, error: f64) -> Result<Solution> {
    if !(error.is_finite() && error > 0.0 && error < 1.0) {
        return Err(Error::InvalidArgument(format!(
            "error tolerance must be within (0, 1), got {}",
            error
        )));
    }
    if weights.is_empty() {
        return Ok(Solution::new());
    }

    let delta = error / weights.len() as f64;
    let mut partials = Partials::new();
    let mut widest = 0;
    for (item, &weight) in weights.iter().enumerate() {
        partials.extend(item, weight, target);
        partials.thin(delta);
        widest = widest.max(partials.len());
    }
    debug!(
        num_items = weights.len(),
        delta,
        widest_frontier = widest,
        "approximation finished"
    );
    Ok(partials.best(weights))
}
