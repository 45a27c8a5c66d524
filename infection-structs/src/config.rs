use crate::serializable_struct_with_getters;
use infection_subset_sum::{resolve_error, Algorithm, Result};
use serde::{Deserialize, Serialize};

/// Largest pseudo-polynomial table a selection builds unless told otherwise.
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 20_000_000;

serializable_struct_with_getters! {
    SelectionConfig {
        #[serde(default)]
        algorithm: Algorithm,
        error: Option<f64>,
        max_table_cells: Option<u64>,
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Greedy,
            error: None,
            max_table_cells: None,
        }
    }
}

impl SelectionConfig {
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn tolerance(&self) -> Result<f64> {
        resolve_error(self.error)
    }

    pub fn table_limit(&self) -> u64 {
        self.max_table_cells.unwrap_or(DEFAULT_MAX_TABLE_CELLS)
    }
}

serializable_struct_with_getters! {
    TimingSettings {
        initial_sample_size: usize,
        max_sample_size: usize,
        max_element: u64,
        proportion: f64,
        overtime_secs: f64,
        seed_phrase: String,
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            initial_sample_size: 100,
            max_sample_size: 1 << 14,
            max_element: 10,
            proportion: 0.2,
            overtime_secs: 10.0,
            seed_phrase: "timing".to_string(),
        }
    }
}
