use crate::Solution;

/// Item indices ordered by weight, heaviest first. Equal weights keep input order.
pub(crate) fn descending(weights: &[u64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].cmp(&weights[a]));
    order
}

/// Takes every item of `order` that still fits under `target`.
pub(crate) fn sorted_greedy(weights: &[u64], order: &[usize], target: u64) -> Solution {
    let mut sum = 0u64;
    let mut items = Vec::new();
    for &item in order {
        if let Some(next) = sum.checked_add(weights[item]).filter(|&next| next <= target) {
            sum = next;
            items.push(item);
        }
    }
    items.sort_unstable();
    Solution { sum, items }
}

/// Heaviest-first greedy fill. Never worse than half the optimum.
pub fn solve(weights: &[u64], target: u64) -> Solution {
    sorted_greedy(weights, &descending(weights), target)
}
