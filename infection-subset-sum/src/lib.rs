//! Solvers for the subset sum optimization problem: find the subset of
//! non-negative weights with the largest sum that does not exceed a target.
//!
//! Five interchangeable algorithms are provided, trading accuracy for speed:
//!
//! | algorithm          | guarantee              | time                       |
//! |--------------------|------------------------|----------------------------|
//! | `exact`            | optimal                | O(2^n)                     |
//! | `pseudopolynomial` | optimal                | O(n * target)              |
//! | `approximation`    | >= (1 - error) optimal | O(n^2 * ln(target) / error) |
//! | `greedy`           | >= 1/2 optimal         | O(n log n)                 |
//! | `iterated_greedy`  | >= 1/2 optimal         | O(n^2)                     |
//!
//! When several subsets reach the same best sum, which one is returned is
//! not canonical across algorithms. Only the achieved sum is comparable.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

mod error;
pub use error::{Error, Result};
use error::non_negative;
mod partials;

pub mod approximation;
pub mod exact;
pub mod greedy;
pub mod iterated_greedy;
pub mod pseudopolynomial;

/// Tolerance used by the approximation scheme when the caller gives none.
pub const DEFAULT_ERROR: f64 = 0.5;

/// Result of a solver: the achieved sum and the indices (ascending) of the
/// weights that make it up.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub sum: u64,
    pub items: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self {
            sum: 0,
            items: Vec::new(),
        }
    }

    pub(crate) fn from_items(weights: &[u64], mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        let sum = items.iter().map(|&i| weights[i]).sum();
        Self { sum, items }
    }
}

/// Subset of caller items picked by [`optimize`], in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset<T> {
    pub sum: u64,
    pub items: Vec<T>,
}

/// A payload with the weight it is optimized by.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeightedItem<T> {
    pub weight: u64,
    pub payload: T,
}

impl<T> WeightedItem<T> {
    pub fn new(weight: u64, payload: T) -> Self {
        Self { weight, payload }
    }

    pub fn try_new(weight: i64, payload: T) -> Result<Self> {
        Ok(Self {
            weight: non_negative(weight, "weight")?,
            payload,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Exact,
    Pseudopolynomial,
    Approximation,
    #[default]
    Greedy,
    IteratedGreedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Exact,
        Algorithm::Pseudopolynomial,
        Algorithm::Approximation,
        Algorithm::Greedy,
        Algorithm::IteratedGreedy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Exact => "exact",
            Algorithm::Pseudopolynomial => "pseudopolynomial",
            Algorithm::Approximation => "approximation",
            Algorithm::Greedy => "greedy",
            Algorithm::IteratedGreedy => "iterated_greedy",
        }
    }

    /// Runs this algorithm over `weights`.
    ///
    /// `error` only affects [`Algorithm::Approximation`], but a malformed value
    /// is rejected for every algorithm. `None` means [`DEFAULT_ERROR`].
    pub fn solve(&self, weights: &[u64], target: u64, error: Option<f64>) -> Result<Solution> {
        let error = resolve_error(error)?;
        if target == 0 || weights.is_empty() {
            return Ok(Solution::new());
        }
        Ok(match self {
            Algorithm::Exact => exact::solve(weights, target),
            Algorithm::Pseudopolynomial => pseudopolynomial::solve(weights, target)?,
            Algorithm::Approximation => approximation::solve(weights, target, error)?,
            Algorithm::Greedy => greedy::solve(weights, target),
            Algorithm::IteratedGreedy => iterated_greedy::solve(weights, target),
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("{} is not a valid algorithm selection", s)))
    }
}

/// Validates an error tolerance, falling back to [`DEFAULT_ERROR`] when absent.
pub fn resolve_error(error: Option<f64>) -> Result<f64> {
    match error {
        None => Ok(DEFAULT_ERROR),
        Some(e) if e.is_finite() && e > 0.0 && e < 1.0 => Ok(e),
        Some(e) => Err(Error::InvalidArgument(format!(
            "error tolerance must be within (0, 1), got {}",
            e
        ))),
    }
}

/// Finds the subset of `items` with the largest total `weight` not exceeding `target`.
///
/// [`Algorithm::Pseudopolynomial`] allocates `(items + 1) * (target + 1)` table
/// cells up front and fails when they cannot be addressed or allocated. No
/// size limit is applied here; check [`pseudopolynomial::table_cells`] first to
/// enforce one.
///
/// ```
/// use infection_subset_sum::{optimize, Algorithm};
///
/// let subset = optimize(&[1, 2, 3], 5, Algorithm::Exact, None, |&x| x).unwrap();
/// assert_eq!(subset.sum, 5);
/// assert_eq!(subset.items, vec![&2, &3]);
/// ```
pub fn optimize<'a, T, F>(
    items: &'a [T],
    target: i64,
    algorithm: Algorithm,
    error: Option<f64>,
    weight: F,
) -> Result<Subset<&'a T>>
where
    F: Fn(&T) -> i64,
{
    let target = non_negative(target, "target")?;
    let weights = items
        .iter()
        .map(|item| non_negative(weight(item), "weight"))
        .collect::<Result<Vec<u64>>>()?;
    let solution = algorithm.solve(&weights, target, error)?;
    Ok(Subset {
        sum: solution.sum,
        items: solution.items.iter().map(|&i| &items[i]).collect(),
    })
}

/// Same as [`optimize`] for items that already carry their weight.
pub fn optimize_weighted<T>(
    items: &[WeightedItem<T>],
    target: u64,
    algorithm: Algorithm,
    error: Option<f64>,
) -> Result<Subset<&WeightedItem<T>>> {
    let weights: Vec<u64> = items.iter().map(|item| item.weight).collect();
    let solution = algorithm.solve(&weights, target, error)?;
    Ok(Subset {
        sum: solution.sum,
        items: solution.items.iter().map(|&i| &items[i]).collect(),
    })
}
