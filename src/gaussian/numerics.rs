use std::f64::consts::{FRAC_1_SQRT_2, PI};

// Scaled complementary error function exp(x^2) * erfc(x) for x >= 0,
// Chebyshev fit with fractional error below 1.2e-7.
#[inline]
fn erfcx_nonnegative(x: f64) -> f64 {
    let t = 1f64 / (1f64 + 0.5f64 * x);
    let poly = -1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398
                                + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277))))))));
    t * poly.exp()
}

/// Complementary error function
#[inline]
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let value = erfcx_nonnegative(z) * (-z * z).exp();
    if x >= 0f64 {
        value
    } else {
        2f64 - value
    }
}

/// Density of the standard normal distribution
#[inline]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5f64 * x * x).exp() / (2f64 * PI).sqrt()
}

/// Cumulative distribution function of the standard normal distribution
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5f64 * erfc(-x * FRAC_1_SQRT_2)
}

/// Logarithm of the standard normal cdf, accurate far in the left tail
#[inline]
pub fn log_normal_cdf(x: f64) -> f64 {
    if x < 0f64 {
        0.5f64.ln() - 0.5f64 * x * x + erfcx_nonnegative(-x * FRAC_1_SQRT_2).ln()
    } else {
        (-0.5f64 * erfc(x * FRAC_1_SQRT_2)).ln_1p()
    }
}

// below this argument the ratio and its derivative come from a continued fraction
const CONTINUED_FRACTION_BOUND: f64 = -2f64;
const CONTINUED_FRACTION_TERMS: usize = 120;

// Laplace continued fraction of the Mills ratio at u = -x > 0:
// cdf(x) / pdf(x) = 1 / (u + 1 / (u + 2 / (u + 3 / (u + ...)))).
// Returns r = pdf(x) / cdf(x) and 1 - r * (x + r), the latter without cancellation
#[inline]
fn left_tail_ratio(x: f64) -> (f64, f64) {
    let u = -x;
    let mut tail = 0f64;
    for k in (2..=CONTINUED_FRACTION_TERMS).rev() {
        tail = k as f64 / (u + tail);
    }
    let c = 1f64 / (u + tail);
    (u + c, c * (tail - c))
}

/// Ratio pdf(x) / cdf(x) of the standard normal distribution
/// (inverse Mills ratio), finite for any finite x
#[inline]
pub fn normal_pdf_cdf_ratio(x: f64) -> f64 {
    if x < CONTINUED_FRACTION_BOUND {
        left_tail_ratio(x).0
    } else if x < 0f64 {
        (2f64 / PI).sqrt() / erfcx_nonnegative(-x * FRAC_1_SQRT_2)
    } else {
        normal_pdf(x) / normal_cdf(x)
    }
}

/// Returns r = pdf(x) / cdf(x) together with 1 - r * (x + r), which is the
/// variance of a standard normal truncated to (-inf, x]
#[inline]
pub fn normal_ratio_and_variance_factor(x: f64) -> (f64, f64) {
    if x < CONTINUED_FRACTION_BOUND {
        left_tail_ratio(x)
    } else {
        let ratio = normal_pdf_cdf_ratio(x);
        (ratio, 1f64 - ratio * (x + ratio))
    }
}

/// Moments of the tilted distribution N(x | mean, variance) * cdf(y * x),
/// where y = 1 for a positive observation and y = -1 otherwise.
///
/// Returns the log normalization constant, the mean and the variance
///
/// # Arguments
///
/// * `cavity_mean` - Mean of a cavity distribution
/// * `cavity_variance` - Variance of a cavity distribution, must be positive and finite
/// * `observation` - A binary observation
#[inline]
pub fn probit_tilted_moments(
    cavity_mean: f64,
    cavity_variance: f64,
    observation: bool,
) -> (f64, f64, f64) {
    let sign = if observation { 1f64 } else { -1f64 };
    let scale = (1f64 + cavity_variance).sqrt();
    let z = sign * cavity_mean / scale;
    let (ratio, variance_factor) = normal_ratio_and_variance_factor(z);
    let mean = cavity_mean + sign * cavity_variance * ratio / scale;
    // v - v^2 r (z + r) / (1 + v) regrouped around 1 - r (z + r)
    let variance = cavity_variance * (1f64 + cavity_variance * variance_factor)
        / (1f64 + cavity_variance);
    let variance = variance.clamp(f64::MIN_POSITIVE, cavity_variance);
    (log_normal_cdf(z), mean, variance)
}
