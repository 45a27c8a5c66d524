//! Exhaustive search over every reachable partial sum.
//!
//! Each item doubles the candidate frontier before sums above the target are
//! dropped, so the frontier holds at most `min(2^n, target + 1)` entries.
//! Only practical for a few dozen items unless the target is small.
use crate::{partials::Partials, Solution};
use tracing::debug;

pub fn solve(weights: &[u64], target: u64) -> Solution {
    let mut partials = Partials::new();
    for (item, &weight) in weights.iter().enumerate() {
        partials.extend(item, weight, target);
    }
    debug!(
        num_items = weights.len(),
        frontier = partials.len(),
        "exact search finished"
    );
    partials.best(weights)
}
