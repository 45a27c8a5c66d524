use crate::{partition, partition::Group, selector::select_groups, Result, SelectionConfig, SelectionError};
use std::{collections::HashSet, hash::Hash};

/// Selects the whole connected group that contains `anchor`.
///
/// An empty population selects nothing whatever the anchor. Otherwise an
/// anchor missing from `population` is [`SelectionError::NotFound`].
pub fn select_all<T, F, I>(population: &[T], adjacency: F, anchor: &T) -> Result<HashSet<T>>
where
    T: Eq + Hash + Clone,
    F: Fn(&T) -> I,
    I: IntoIterator<Item = T>,
{
    if population.is_empty() {
        return Ok(HashSet::new());
    }
    if !population.contains(anchor) {
        return Err(SelectionError::NotFound(
            "anchor entity is not part of the population".to_string(),
        ));
    }
    select_group_of(&partition(population, adjacency)?, anchor)
}

/// Selects the group containing `anchor` from an existing partition.
///
/// No groups select nothing; otherwise an anchor in none of them is
/// [`SelectionError::NotFound`].
pub fn select_group_of<T>(groups: &[Group<T>], anchor: &T) -> Result<HashSet<T>>
where
    T: Eq + Hash + Clone,
{
    if groups.is_empty() {
        return Ok(HashSet::new());
    }
    groups
        .iter()
        .find(|group| group.contains(anchor))
        .map(|group| group.iter().cloned().collect())
        .ok_or_else(|| {
            SelectionError::NotFound("anchor entity is not part of the population".to_string())
        })
}

/// Selects whole groups whose combined size best approaches `target_size`
/// without exceeding it, using the solver named in `config`.
///
/// Groups are never split. When one cluster is larger than the target it is
/// skipped entirely; callers needing finer control should hand in an
/// adjacency function that leaves out some links.
pub fn select_bounded<T, F, I>(
    population: &[T],
    adjacency: F,
    target_size: i64,
    config: &SelectionConfig,
) -> Result<HashSet<T>>
where
    T: Eq + Hash + Clone,
    F: Fn(&T) -> I,
    I: IntoIterator<Item = T>,
{
    if target_size < 0 {
        return Err(SelectionError::InvalidArgument(format!(
            "target must be non-negative, got {}",
            target_size
        )));
    }
    config.tolerance()?;
    if population.is_empty() {
        return Ok(HashSet::new());
    }
    select_groups(partition(population, adjacency)?, target_size, config)
}
