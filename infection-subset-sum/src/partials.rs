use crate::Solution;

/// A reachable partial sum. `node` points at the arena link of the last item
/// added to reach it, `None` for the empty subset.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Partial {
    pub sum: u64,
    pub node: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    item: usize,
    parent: Option<usize>,
}

/// Frontier of distinct partial sums, kept sorted ascending. Subsets are
/// shared through an append-only arena of (item, parent) links.
pub(crate) struct Partials {
    entries: Vec<Partial>,
    links: Vec<Link>,
}

impl Partials {
    pub fn new() -> Self {
        Self {
            entries: vec![Partial { sum: 0, node: None }],
            links: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Merges in every partial sum extended by `item`, dropping sums above
    /// `limit`. On equal sums the subset without `item` is kept.
    ///
    /// Links are only allocated for extended sums that survive the merge, so
    /// without thinning the arena never outgrows the number of distinct sums.
    pub fn extend(&mut self, item: usize, weight: u64, limit: u64) {
        let extended: Vec<(u64, Option<usize>)> = self
            .entries
            .iter()
            .map_while(|partial| {
                partial
                    .sum
                    .checked_add(weight)
                    .filter(|&sum| sum <= limit)
                    .map(|sum| (sum, partial.node))
            })
            .collect();

        let mut merged: Vec<Partial> = Vec::with_capacity(self.entries.len() + extended.len());
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() || j < extended.len() {
            let take_old = j == extended.len()
                || (i < self.entries.len() && self.entries[i].sum <= extended[j].0);
            let sum = if take_old { self.entries[i].sum } else { extended[j].0 };
            let seen = merged.last().is_some_and(|last| last.sum == sum);
            if take_old {
                if !seen {
                    merged.push(self.entries[i]);
                }
                i += 1;
            } else {
                if !seen {
                    self.links.push(Link {
                        item,
                        parent: extended[j].1,
                    });
                    merged.push(Partial {
                        sum,
                        node: Some(self.links.len() - 1),
                    });
                }
                j += 1;
            }
        }
        self.entries = merged;
    }

    /// Drops every partial sum within a relative `delta` of the last one kept.
    /// The smallest sum always survives.
    pub fn thin(&mut self, delta: f64) {
        let mut last = match self.entries.first() {
            Some(first) => first.sum,
            None => return,
        };
        let mut keep_first = true;
        self.entries.retain(|partial| {
            if keep_first {
                keep_first = false;
                return true;
            }
            if (last as f64) < (1.0 - delta) * partial.sum as f64 {
                last = partial.sum;
                true
            } else {
                false
            }
        });
    }

    pub fn best(&self, weights: &[u64]) -> Solution {
        let mut items = Vec::new();
        let mut node = self.entries.last().and_then(|partial| partial.node);
        while let Some(index) = node {
            let link = self.links[index];
            items.push(link.item);
            node = link.parent;
        }
        Solution::from_items(weights, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_keeps_sorted_unique_sums() {
        let weights = [1, 2, 3];
        let mut partials = Partials::new();
        for (item, &weight) in weights.iter().enumerate() {
            partials.extend(item, weight, 100);
        }
        let sums: Vec<u64> = partials.entries.iter().map(|p| p.sum).collect();
        assert_eq!(sums, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_equal_sum_prefers_earlier_subset() {
        let weights = [1, 2, 3];
        let mut partials = Partials::new();
        for (item, &weight) in weights.iter().enumerate() {
            partials.extend(item, weight, 3);
        }
        assert_eq!(partials.best(&weights).items, vec![0, 1]);
    }

    #[test]
    fn test_arena_bounded_by_distinct_sums() {
        let weights = vec![1u64; 50];
        let mut partials = Partials::new();
        for (item, &weight) in weights.iter().enumerate() {
            partials.extend(item, weight, 10);
        }
        assert_eq!(partials.len(), 11);
        assert_eq!(partials.links.len(), 10);
        assert_eq!(partials.best(&weights).sum, 10);
    }

    #[test]
    fn test_thin_keeps_first_and_spaced_sums() {
        let mut partials = Partials::new();
        partials.entries = [0u64, 10, 11, 12, 20, 21]
            .iter()
            .map(|&sum| Partial { sum, node: None })
            .collect();
        partials.thin(0.1);
        let sums: Vec<u64> = partials.entries.iter().map(|p| p.sum).collect();
        assert_eq!(sums, vec![0, 10, 12, 20]);
    }
}
