use crate::core::Message;
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

// ------------------------------------------------------------------------------------------

/// Gaussian message in natural parameters, i.e. it is proportional to
/// exp ( -precision * x^2 / 2 + precision_mean * x )
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianMessage {
    /// Inverse variance
    pub precision: f64,

    /// Precision multiplied by the mean
    pub precision_mean: f64,
}

impl GaussianMessage {
    /// Creates a flat (uniform) message carrying no information
    #[inline(always)]
    pub fn uniform() -> Self {
        GaussianMessage {
            precision: 0f64,
            precision_mean: 0f64,
        }
    }

    /// Creates a message from a mean and a variance. An infinite variance
    /// gives a flat message
    #[inline]
    pub fn from_moments(mean: f64, variance: f64) -> Self {
        if variance.is_infinite() {
            return GaussianMessage::uniform();
        }
        let precision = 1f64 / variance;
        GaussianMessage {
            precision,
            precision_mean: precision * mean,
        }
    }

    /// Returns true if a message is a normalizable density
    #[inline(always)]
    pub fn is_proper(&self) -> bool {
        self.precision > 0f64 && self.precision.is_finite()
    }

    /// Mean of a message. Zero for a message that is not proper
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.is_proper() {
            self.precision_mean / self.precision
        } else {
            0f64
        }
    }

    /// Variance of a message. Infinite for a message that is not proper
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.is_proper() {
            1f64 / self.precision
        } else {
            f64::INFINITY
        }
    }

    /// Exponential moving average with a previous message
    ///
    /// # Arguments
    ///
    /// * `prev` - A previous message
    /// * `damping` - Weight of the previous message, 0 means no damping
    #[inline(always)]
    pub fn damp(self, prev: &GaussianMessage, damping: f64) -> Self {
        if damping == 0f64 {
            return self;
        }
        GaussianMessage {
            precision: (1f64 - damping) * self.precision + damping * prev.precision,
            precision_mean: (1f64 - damping) * self.precision_mean
                + damping * prev.precision_mean,
        }
    }
}

impl Default for GaussianMessage {
    fn default() -> Self {
        GaussianMessage::uniform()
    }
}

impl Mul for GaussianMessage {
    type Output = GaussianMessage;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        GaussianMessage {
            precision: self.precision + rhs.precision,
            precision_mean: self.precision_mean + rhs.precision_mean,
        }
    }
}

impl Div for GaussianMessage {
    type Output = GaussianMessage;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        GaussianMessage {
            precision: self.precision - rhs.precision,
            precision_mean: self.precision_mean - rhs.precision_mean,
        }
    }
}

impl Message for GaussianMessage {
    #[inline(always)]
    fn discrepancy(&self, other: &Self) -> f64 {
        (self.precision - other.precision)
            .abs()
            .max((self.precision_mean - other.precision_mean).abs())
    }

    #[inline(always)]
    fn memcpy(&self, dst: &mut Self) {
        *dst = *self;
    }
}

// ------------------------------------------------------------------------------------------

/// Marginal distribution of a Gaussian variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    /// Mean, zero when the distribution is not proper
    pub mean: f64,

    /// Variance, infinite when the distribution is not proper
    pub variance: f64,
}

impl Gaussian {
    /// Standard deviation
    #[inline]
    pub fn std(&self) -> f64 {
        self.variance.sqrt()
    }
}

impl From<GaussianMessage> for Gaussian {
    #[inline]
    fn from(message: GaussianMessage) -> Self {
        Gaussian {
            mean: message.mean(),
            variance: message.variance(),
        }
    }
}
