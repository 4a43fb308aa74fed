use super::{factor::GaussianFactor, message::GaussianMessage, variable::GaussianVariable};
use crate::core::FactorGraphBuilder;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Crates a new Gaussian factor graph builder.
///
/// # Arguments
///
/// * `variables_number` - A number of variables
/// * `factors_capacity` - A number of factors we need to preallocate memory for
pub fn new_gaussian_builder(
    variables_number: usize,
    factors_capacity: usize,
) -> FactorGraphBuilder<GaussianFactor, GaussianVariable> {
    FactorGraphBuilder::new_with_variables(variables_number, factors_capacity)
}

/// Crates a message initializer producing zero mean messages
/// with a large variance, the usual starting point of expectation propagation.
///
/// # Arguments
///
/// * `variance` - Variance of initial messages
pub fn vague_message_initializer(variance: f64) -> impl FnMut() -> GaussianMessage {
    let message = GaussianMessage::from_moments(0f64, variance);
    move || message
}

/// Crates a new random Gaussian message initializer.
/// Means of messages are sampled from a uniform distribution over [-1, 1].
///
/// # Arguments
///
/// * `rng` - A generator of random numbers
/// * `variance` - Variance of initial messages
pub fn random_message_initializer(
    mut rng: impl Rng,
    variance: f64,
) -> impl FnMut() -> GaussianMessage {
    let distr = Uniform::new(-1f64, 1f64);
    move || GaussianMessage::from_moments(distr.sample(&mut rng), variance)
}
