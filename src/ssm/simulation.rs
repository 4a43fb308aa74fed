use log::debug;
use ndarray::Array1;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use super::{
    config::ProbitSsmConfig,
    error::{SsmError, SsmResult},
};
use crate::gaussian::numerics::normal_cdf;

/// Synthetic data of a probit state space model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Hidden random walk
    pub latent: Array1<f64>,

    /// Binary observations, `observations[t]` is true with probability cdf(latent[t])
    pub observations: Vec<bool>,
}

/// Simulates a Gaussian random walk started at `initial_mean` and
/// thresholds it through the probit link. The same config (seed included)
/// always gives the same data
///
/// # Arguments
///
/// * `config` - Model and simulation parameters
///
/// # Example
///
/// ```
/// use gmrs_ep::ssm::{simulate, ProbitSsmConfig};
///
/// let config = ProbitSsmConfig { steps: 5, ..Default::default() };
/// let data = simulate(&config).unwrap();
/// assert_eq!(data.latent.len(), 5);
/// assert_eq!(data.observations.len(), 5);
/// assert_eq!(data, simulate(&config).unwrap());
/// ```
pub fn simulate(config: &ProbitSsmConfig) -> SsmResult<Simulation> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let step_distr = Normal::new(0f64, config.transition_variance.sqrt())
        .map_err(|err| SsmError::InvalidConfig("transition_variance", err.to_string()))?;
    let mut latent = Array1::zeros(config.steps);
    let mut observations = Vec::with_capacity(config.steps);
    let mut state = config.initial_mean;
    for t in 0..config.steps {
        state += step_distr.sample(&mut rng);
        latent[t] = state;
        let p_positive = normal_cdf(state).clamp(0f64, 1f64);
        observations.push(rng.gen_bool(p_positive));
    }
    debug!(
        "simulated {} steps, {} positive observations",
        config.steps,
        observations.iter().filter(|y| **y).count()
    );
    Ok(Simulation {
        latent,
        observations,
    })
}
