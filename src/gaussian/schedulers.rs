/// Hyper-parameters of Gaussian factors' message passing
#[derive(Debug, Clone, Copy)]
pub struct GaussianFactorParameters {
    /// Exponential moving average coefficient, 0 means no damping
    pub damping: f64,
}

/// Returns a scheduler for messages update rule of a Gaussian factor
/// with a constant damping
///
/// # Arguments
///
/// * `damping` - Exponential moving average coefficient
pub fn get_standard_factor_scheduler(damping: f64) -> impl Fn(usize) -> GaussianFactorParameters {
    move |_| GaussianFactorParameters { damping }
}

/// Returns a scheduler for messages update rule of a Gaussian factor
/// with damping relaxing exponentially from `damping_start` to `damping_end`
///
/// # Arguments
///
/// * `damping_start` - Damping at the first iteration
/// * `damping_end` - Asymptotic damping
/// * `time_scale` - Number of iterations reducing the distance to `damping_end` e times
pub fn get_relaxing_factor_scheduler(
    damping_start: f64,
    damping_end: f64,
    time_scale: f64,
) -> impl Fn(usize) -> GaussianFactorParameters {
    move |iter| {
        let damping =
            damping_end + (damping_start - damping_end) * f64::exp(-(iter as f64) / time_scale);
        GaussianFactorParameters { damping }
    }
}

/// Returns a scheduler for messages update rule of a Gaussian variable
///
/// # Arguments
///
/// * `damping` - exponential moving average coefficient
pub fn get_standard_variable_scheduler(damping: f64) -> impl Fn(usize) -> f64 {
    move |_| damping
}
