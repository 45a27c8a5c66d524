//! Dynamic programming over (items considered, capacity left).
//!
//! The table is one flat arena of `(n + 1) * (target + 1)` cells. Every cell
//! stores the best sum reachable with the first `row` items inside `column`
//! capacity, plus the index of the cell it was derived from. Walking those
//! indices back from the bottom right corner recovers the subset: a step
//! that changes column means the row's item was taken.
use crate::{Error, Result, Solution};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct Cell {
    sum: u64,
    prev: Option<usize>,
}

/// Number of cells the table needs, or an error when it cannot be addressed.
pub fn table_cells(num_items: usize, target: u64) -> Result<usize> {
    usize::try_from(target)
        .ok()
        .and_then(|target| target.checked_add(1))
        .and_then(|width| width.checked_mul(num_items.checked_add(1)?))
        .filter(|&cells| {
            cells
                .checked_mul(std::mem::size_of::<Cell>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "table for {} items and target {} is too large",
                num_items, target
            ))
        })
}

/// Fails with [`Error::InvalidArgument`] instead of aborting when the table
/// cannot be allocated.
pub fn solve(weights: &[u64], target: u64) -> Result<Solution> {
    let cells = table_cells(weights.len(), target)?;
    let width = cells / (weights.len() + 1);
    debug!(rows = weights.len() + 1, width, "filling subset sum table");

    let mut table: Vec<Cell> = Vec::new();
    table.try_reserve_exact(cells).map_err(|e| {
        Error::InvalidArgument(format!("cannot allocate a table of {} cells: {}", cells, e))
    })?;
    table.resize(cells, Cell { sum: 0, prev: None });
    for row in 1..=weights.len() {
        let weight = weights[row - 1];
        let above = (row - 1) * width;
        for left in 0..width {
            let skip = Cell {
                sum: table[above + left].sum,
                prev: Some(above + left),
            };
            table[row * width + left] = match usize::try_from(weight) {
                Ok(weight) if weight <= left => {
                    let from = above + left - weight;
                    let take = Cell {
                        sum: table[from].sum + weight as u64,
                        prev: Some(from),
                    };
                    if take.sum > skip.sum {
                        take
                    } else {
                        skip
                    }
                }
                _ => skip,
            };
        }
    }

    let mut current = cells - 1;
    let sum = table[current].sum;
    let mut items = Vec::new();
    while let Some(prev) = table[current].prev {
        if current % width != prev % width {
            items.push(current / width - 1);
        }
        current = prev;
    }
    items.reverse();
    Ok(Solution { sum, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_cells() {
        assert_eq!(table_cells(3, 5).unwrap(), 24);
        assert_eq!(table_cells(0, 0).unwrap(), 1);
        assert!(table_cells(usize::MAX, 1).is_err());
        assert!(table_cells(2, u64::MAX).is_err());
        assert!(table_cells(1, 1 << 60).is_err());
    }

    #[test]
    fn test_unaddressable_table_is_an_error() {
        assert!(solve(&[1], 1 << 60).is_err());
        assert!(solve(&[1, 2], u64::MAX / 2).is_err());
    }

    #[test]
    fn test_walk_back_recovers_items() {
        let solution = solve(&[4, 1, 5, 2], 8).unwrap();
        assert_eq!(solution.sum, 8);
        let total: u64 = solution.items.iter().map(|&i| [4, 1, 5, 2][i]).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_zero_weight_items_are_skipped() {
        let solution = solve(&[0, 3, 0], 3).unwrap();
        assert_eq!(solution, Solution { sum: 3, items: vec![1] });
    }
}
