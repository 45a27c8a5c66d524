use crate::{partition::Group, Result, SelectionConfig, SelectionError};
use infection_subset_sum::{optimize_weighted, pseudopolynomial, Algorithm, WeightedItem};
use std::{collections::HashSet, hash::Hash};
use tracing::debug;

/// Picks whole groups whose combined size best approaches `target` without
/// exceeding it, and returns the union of their members.
///
/// A target of 0 or an empty group list selects nothing.
pub fn select_groups<T>(groups: Vec<Group<T>>, target: i64, config: &SelectionConfig) -> Result<HashSet<T>>
where
    T: Eq + Hash + Clone,
{
    let target = u64::try_from(target).map_err(|_| {
        SelectionError::InvalidArgument(format!("target must be non-negative, got {}", target))
    })?;
    config.tolerance()?;
    if config.algorithm == Algorithm::Pseudopolynomial && target > 0 && !groups.is_empty() {
        let cells = pseudopolynomial::table_cells(groups.len(), target)?;
        if cells as u64 > config.table_limit() {
            return Err(SelectionError::InvalidArgument(format!(
                "pseudopolynomial table of {} cells exceeds the limit of {}",
                cells,
                config.table_limit()
            )));
        }
    }

    let items: Vec<WeightedItem<Group<T>>> = groups
        .into_iter()
        .map(|group| WeightedItem::new(group.len() as u64, group))
        .collect();
    let subset = optimize_weighted(&items, target, config.algorithm, config.error)?;
    debug!(
        algorithm = %config.algorithm,
        target,
        achieved = subset.sum,
        num_groups = items.len(),
        num_selected = subset.items.len(),
        "groups selected"
    );

    Ok(subset
        .items
        .iter()
        .flat_map(|item| item.payload.iter().cloned())
        .collect())
}
