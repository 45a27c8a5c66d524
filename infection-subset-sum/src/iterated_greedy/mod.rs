use crate::{
    greedy::{descending, sorted_greedy},
    Solution,
};
use tracing::debug;

/// Runs the heaviest-first greedy fill from every suffix of the sorted items
/// and keeps the best, stopping as soon as one run hits `target` exactly.
pub fn solve(weights: &[u64], target: u64) -> Solution {
    let order = descending(weights);
    let mut best: Option<Solution> = None;
    let mut runs = 0;
    for start in 0..order.len() {
        let candidate = sorted_greedy(weights, &order[start..], target);
        runs += 1;
        let exact_hit = candidate.sum == target;
        if best.as_ref().map_or(true, |b| candidate.sum > b.sum) {
            best = Some(candidate);
        }
        if exact_hit {
            break;
        }
    }
    debug!(num_items = weights.len(), runs, "iterated greedy finished");
    best.unwrap_or_default()
}
