use anyhow::Result;
use infection_structs::{
    config::{TimingSettings, DEFAULT_MAX_TABLE_CELLS},
    core::{AlgorithmTiming, TimingReport, TimingRound},
};
use infection_subset_sum::{pseudopolynomial, Algorithm};
use infection_utils::seed_from_phrase;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::{info, warn};

/// Times every solver on growing random samples.
///
/// The sample size doubles each round. A solver that runs longer than
/// `overtime_secs` (or whose table would not fit) is retired for the
/// remaining rounds.
pub fn timing_report(settings: &TimingSettings) -> Result<TimingReport> {
    let mut active: Vec<Algorithm> = Algorithm::ALL.to_vec();
    let mut sample_size = settings.initial_sample_size.max(1);
    let mut rounds = Vec::new();

    while !active.is_empty() && sample_size <= settings.max_sample_size {
        let mut rng = SmallRng::from_seed(seed_from_phrase(&settings.seed_phrase, rounds.len() as u64));
        let weights: Vec<u64> = (0..sample_size)
            .map(|_| rng.gen_range(1..=settings.max_element.max(1)))
            .collect();
        let target = (weights.iter().sum::<u64>() as f64 * settings.proportion) as u64;

        let mut results = Vec::with_capacity(active.len());
        let mut retired = Vec::new();
        for &algorithm in &active {
            if algorithm == Algorithm::Pseudopolynomial {
                let cells = pseudopolynomial::table_cells(weights.len(), target)?;
                if cells as u64 > DEFAULT_MAX_TABLE_CELLS {
                    warn!(sample_size, cells, "table too large, retiring pseudopolynomial");
                    retired.push(algorithm);
                    continue;
                }
            }
            let start = Instant::now();
            let solution = algorithm.solve(&weights, target, None)?;
            let seconds = start.elapsed().as_secs_f64();
            if seconds > settings.overtime_secs {
                retired.push(algorithm);
            }
            results.push(AlgorithmTiming {
                algorithm,
                seconds,
                sum: solution.sum,
            });
        }
        info!(sample_size, target, retired = retired.len(), "timing round finished");

        active.retain(|algorithm| !retired.contains(algorithm));
        rounds.push(TimingRound {
            sample_size,
            target,
            results,
        });
        sample_size = match sample_size.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(TimingReport { rounds })
}
