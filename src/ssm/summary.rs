use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::{SsmError, SsmResult};

/// Posterior of a probit state space model, marginal per time step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSummary {
    /// Posterior means of the states
    pub means: Array1<f64>,

    /// Posterior variances of the states
    pub variances: Array1<f64>,

    /// Number of performed message passing iterations
    pub iterations: usize,

    /// Discrepancy of messages at the last iteration
    pub last_discrepancy: f64,
}

impl PosteriorSummary {
    /// Number of time steps
    #[inline]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Returns true if there are no time steps
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Iterates over (time step, mean, variance)
    pub fn rows(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.means
            .iter()
            .zip(self.variances.iter())
            .enumerate()
            .map(|(t, (mean, variance))| (t, *mean, *variance))
    }

    /// Returns the interval mean +- `width` standard deviations at
    /// a time step `t`, None if `t` is out of range
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::ssm::PosteriorSummary;
    /// use ndarray::array;
    ///
    /// let summary = PosteriorSummary {
    ///     means: array![1.],
    ///     variances: array![4.],
    ///     iterations: 1,
    ///     last_discrepancy: 0.,
    /// };
    /// assert_eq!(summary.credible_interval(0, 1.), Some((-1., 3.)));
    /// assert_eq!(summary.credible_interval(1, 1.), None);
    /// ```
    pub fn credible_interval(&self, t: usize, width: f64) -> Option<(f64, f64)> {
        let mean = *self.means.get(t)?;
        let std = self.variances.get(t)?.sqrt();
        Some((mean - width * std, mean + width * std))
    }

    /// Serializes a summary to YAML
    pub fn to_yaml(&self) -> SsmResult<String> {
        serde_yaml::to_string(self).map_err(|err| SsmError::Serialization(err.to_string()))
    }
}
