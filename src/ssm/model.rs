use log::{debug, info, warn};
use ndarray::Array1;

use super::{
    config::ProbitSsmConfig,
    error::{SsmError, SsmResult},
    summary::PosteriorSummary,
};
use crate::core::{FGError, FactorGraph};
use crate::gaussian::schedulers::{get_standard_factor_scheduler, get_standard_variable_scheduler};
use crate::gaussian::{new_gaussian_builder, vague_message_initializer, GaussianFactor, GaussianVariable};

/// Variance of messages at the start of expectation propagation
pub const VAGUE_VARIANCE: f64 = 1e12;

/// Factor graph of a probit state space model
pub type ProbitSsmGraph = FactorGraph<GaussianFactor, GaussianVariable>;

/// Builds a factor graph of a probit state space model:
/// one variable per time step, a prior on the first state, a random walk
/// transition between neighbouring states and a probit factor per observation.
///
/// # Arguments
///
/// * `observations` - Binary observations, one per time step
/// * `config` - Model parameters
///
/// # Example
///
/// ```
/// use gmrs_ep::ssm::{build_probit_ssm, ProbitSsmConfig};
///
/// let fg = build_probit_ssm(&[true, false, true], &ProbitSsmConfig::default()).unwrap();
/// assert_eq!(fg.get_variable_degrees(), vec![3, 3, 2]);
/// ```
pub fn build_probit_ssm(
    observations: &[bool],
    config: &ProbitSsmConfig,
) -> SsmResult<ProbitSsmGraph> {
    config.validate()?;
    let steps = observations.len();
    if steps == 0 {
        return Err(SsmError::EmptyObservations);
    }
    let mut fgb = new_gaussian_builder(steps, 2 * steps);
    let mut initializer = vague_message_initializer(VAGUE_VARIANCE);
    fgb.add_factor(
        GaussianFactor::prior(config.initial_mean, config.initial_variance),
        &[0],
        &mut initializer,
    )?;
    for t in 1..steps {
        fgb.add_factor(
            GaussianFactor::transition(config.transition_variance),
            &[t - 1, t],
            &mut initializer,
        )?;
    }
    for (t, observation) in observations.iter().enumerate() {
        fgb.add_factor(GaussianFactor::probit(*observation), &[t], &mut initializer)?;
    }
    Ok(fgb.build())
}

/// Runs expectation propagation on a probit state space model and
/// returns posterior means and variances of the states.
///
/// Without `config.threshold` exactly `config.iterations` iterations are run,
/// otherwise message passing runs until convergence and fails if it does not
/// converge within `config.iterations` iterations.
///
/// # Arguments
///
/// * `observations` - Binary observations, one per time step
/// * `config` - Model and inference parameters
///
/// # Example
///
/// ```
/// use gmrs_ep::ssm::{infer, ProbitSsmConfig};
///
/// let posterior = infer(&[true; 5], &ProbitSsmConfig::default()).unwrap();
/// assert!(posterior.means.iter().all(|m| *m > 0.));
/// ```
pub fn infer(observations: &[bool], config: &ProbitSsmConfig) -> SsmResult<PosteriorSummary> {
    let mut fg = build_probit_ssm(observations, config)?;
    info!(
        "running expectation propagation on {} steps",
        observations.len()
    );
    let factor_scheduler = get_standard_factor_scheduler(config.damping);
    let variable_scheduler = get_standard_variable_scheduler(0f64);
    let info = match config.threshold {
        None => fg.run_iterations(config.iterations, &factor_scheduler, &variable_scheduler),
        Some(threshold) => fg
            .run_message_passing_parallel(
                config.iterations,
                0,
                threshold,
                &factor_scheduler,
                &variable_scheduler,
            )
            .map_err(|err| {
                if let FGError::MessagePassingError {
                    last_discrepancy, ..
                } = &err
                {
                    warn!("expectation propagation has not converged, last discrepancy {last_discrepancy}");
                }
                err
            })?,
    };
    info!("{}", info);
    let marginals = fg.variable_marginals();
    let means: Array1<f64> = marginals.iter().map(|m| m.mean).collect();
    let variances: Array1<f64> = marginals.iter().map(|m| m.variance).collect();
    debug!("posterior extracted for {} steps", means.len());
    Ok(PosteriorSummary {
        means,
        variances,
        iterations: info.iterations_number,
        last_discrepancy: info.last_discrepancy,
    })
}
