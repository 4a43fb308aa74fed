use crate::gaussian::numerics::normal_cdf;

/// Exact smoothing of a random walk x_t = x_{t-1} + N(0, q) with
/// x_0 ~ N(m0, v0) and Gaussian observations y_t ~ N(x_t, r).
/// Returns smoothed means and variances
pub(super) fn rts_smoother(
    m0: f64,
    v0: f64,
    q: f64,
    r: f64,
    observations: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let n = observations.len();
    let mut filtered_means = Vec::with_capacity(n);
    let mut filtered_vars = Vec::with_capacity(n);
    let (mut pred_mean, mut pred_var) = (m0, v0);
    for (t, y) in observations.iter().enumerate() {
        if t > 0 {
            pred_mean = filtered_means[t - 1];
            pred_var = filtered_vars[t - 1] + q;
        }
        let gain = pred_var / (pred_var + r);
        filtered_means.push(pred_mean + gain * (y - pred_mean));
        filtered_vars.push((1f64 - gain) * pred_var);
    }
    let mut means = filtered_means.clone();
    let mut vars = filtered_vars.clone();
    for t in (0..n.saturating_sub(1)).rev() {
        let pred_var = filtered_vars[t] + q;
        let gain = filtered_vars[t] / pred_var;
        means[t] = filtered_means[t] + gain * (means[t + 1] - filtered_means[t]);
        vars[t] = filtered_vars[t] + gain * gain * (vars[t + 1] - pred_var);
    }
    (means, vars)
}

/// Posterior mean and variance of x ~ N(mean, variance) observed through
/// a probit link, computed by the trapezoidal rule
pub(super) fn probit_posterior_by_quadrature(
    mean: f64,
    variance: f64,
    observation: bool,
) -> (f64, f64) {
    let std = variance.sqrt();
    let points = 40001;
    let lower = mean - 12f64 * std;
    let step = 24f64 * std / (points - 1) as f64;
    let (mut z, mut m1, mut m2) = (0f64, 0f64, 0f64);
    for i in 0..points {
        let x = lower + step * i as f64;
        let weight = if i == 0 || i == points - 1 { 0.5 } else { 1f64 };
        let likelihood = if observation {
            normal_cdf(x)
        } else {
            normal_cdf(-x)
        };
        let density = weight * (-0.5 * (x - mean).powi(2) / variance).exp() * likelihood;
        z += density;
        m1 += density * x;
        m2 += density * x * x;
    }
    let posterior_mean = m1 / z;
    (posterior_mean, m2 / z - posterior_mean * posterior_mean)
}
