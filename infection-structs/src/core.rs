use crate::serializable_struct_with_getters;
use infection_subset_sum::Algorithm;
use infection_utils::{jsonify, seed_from_phrase};
use serde::{Deserialize, Serialize};

serializable_struct_with_getters! {
    User {
        id: usize,
        #[serde(default)]
        connections: Vec<usize>,
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PopulationModel {
    /// Each user links to up to `density` random other users.
    Random { density: usize },
    /// Teachers and students; students are coached by teachers or peers.
    Classroom {
        p_teacher: f64,
        num_coach: usize,
        p_student_coach: f64,
    },
}

impl Default for PopulationModel {
    fn default() -> Self {
        PopulationModel::Classroom {
            p_teacher: 0.4,
            num_coach: 1,
            p_student_coach: 0.3,
        }
    }
}

serializable_struct_with_getters! {
    PopulationSettings {
        seed_phrase: String,
        size: usize,
        #[serde(default)]
        model: PopulationModel,
    }
}

impl PopulationSettings {
    /// Seed for the `round`-th population drawn from these settings.
    pub fn calc_seed(&self, round: u64) -> serde_json::Result<[u8; 32]> {
        Ok(seed_from_phrase(&jsonify(self)?, round))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Total,
    Limited,
}

serializable_struct_with_getters! {
    SelectionReport {
        feature: String,
        mode: SelectionMode,
        algorithm: Option<Algorithm>,
        target: Option<u64>,
        anchor: Option<usize>,
        population_size: usize,
        num_groups: usize,
        selected: Vec<usize>,
    }
}

impl SelectionReport {
    pub fn selected_size(&self) -> usize {
        self.selected.len()
    }
}

serializable_struct_with_getters! {
    ComponentStats {
        trials: usize,
        mean_num_groups: f64,
        mean_largest_group: f64,
    }
}

serializable_struct_with_getters! {
    AlgorithmTiming {
        algorithm: Algorithm,
        seconds: f64,
        sum: u64,
    }
}

serializable_struct_with_getters! {
    TimingRound {
        sample_size: usize,
        target: u64,
        results: Vec<AlgorithmTiming>,
    }
}

serializable_struct_with_getters! {
    TimingReport {
        rounds: Vec<TimingRound>,
    }
}
