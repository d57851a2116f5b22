use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{PercentileBand, bands_by_year, success_rate};
use crate::config::{ConfigError, SimulationParams};
use crate::trial::run_trial;
use crate::types::Age;

/// Aggregated outcome of a full Monte Carlo run, indexed by age.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub ages: Vec<Age>,
    pub assets: Vec<PercentileBand>,
    pub spending: Vec<PercentileBand>,
    /// Percentage of trials whose pool lasted to the horizon.
    pub success_rate: f64,
    /// Echo of the inputs, so a saved result is self-describing.
    pub params: SimulationParams,
}

/// Validate, run every trial in parallel, and aggregate per-age bands.
///
/// Trial `i` runs on its own `ChaCha20Rng` seeded `seed + i`, so results
/// are reproducible and independent of scheduling order, and any single
/// trial can be replayed in isolation.
pub fn run_monte_carlo(params: &SimulationParams) -> Result<SimulationResult, ConfigError> {
    params.validate()?;

    let trials: Vec<_> = (0..params.simulation_runs as u64)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha20Rng::seed_from_u64(params.seed.wrapping_add(i));
            run_trial(params, &mut rng)
        })
        .collect();

    Ok(SimulationResult {
        ages: (params.current_age.0..=params.horizon_age.0).map(Age).collect(),
        assets: bands_by_year(&trials, |t| &t.assets),
        spending: bands_by_year(&trials, |t| &t.spending),
        success_rate: success_rate(&trials),
        params: params.clone(),
    })
}
