use super::{
    message::GaussianMessage, numerics::probit_tilted_moments,
    schedulers::GaussianFactorParameters,
};
use crate::core::Factor;

// smallest site precision a probit factor may send
pub(crate) const MIN_SITE_PRECISION: f64 = 1e-12;

// ------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
/// Factors of a linear Gaussian model with probit observations
pub enum GaussianFactor {
    /// Unit degree factor N(x | mean, variance). It serves both
    /// as a prior and as a Gaussian observation likelihood
    Prior { mean: f64, variance: f64 },

    /// Random walk transition N(x_next | x_prev, variance),
    /// the first variable is x_prev, the second one is x_next
    Transition { variance: f64 },

    /// Unit degree probit likelihood p(y | x) = cdf(y * x) with
    /// y = 1 for a positive observation and y = -1 otherwise.
    /// Messages are computed by expectation propagation
    Probit { observation: bool },
}

impl GaussianFactor {
    /// Creates a prior factor
    ///
    /// # Arguments
    ///
    /// * `mean` - Prior mean
    /// * `variance` - Prior variance
    #[inline]
    pub fn prior(mean: f64, variance: f64) -> Self {
        GaussianFactor::Prior { mean, variance }
    }

    /// Creates a random walk transition factor
    ///
    /// # Arguments
    ///
    /// * `variance` - Variance of a step
    #[inline]
    pub fn transition(variance: f64) -> Self {
        GaussianFactor::Transition { variance }
    }

    /// Creates a probit observation factor
    ///
    /// # Arguments
    ///
    /// * `observation` - An observed binary value
    #[inline]
    pub fn probit(observation: bool) -> Self {
        GaussianFactor::Probit { observation }
    }
}

// Message obtained by passing `message` through additive Gaussian noise
#[inline(always)]
fn convolve(message: &GaussianMessage, variance: f64) -> GaussianMessage {
    if message.precision <= 0f64 {
        return GaussianMessage::uniform();
    }
    let shrink = 1f64 / (1f64 + variance * message.precision);
    GaussianMessage {
        precision: message.precision * shrink,
        precision_mean: message.precision_mean * shrink,
    }
}

// EP site update: moment matching of cavity * likelihood, divided by the cavity.
// Returns None when the cavity is not a proper distribution
#[inline]
fn probit_site(cavity: &GaussianMessage, observation: bool) -> Option<GaussianMessage> {
    if !cavity.is_proper() {
        return None;
    }
    let (_, mean, variance) =
        probit_tilted_moments(cavity.mean(), cavity.variance(), observation);
    let mut site = GaussianMessage::from_moments(mean, variance) / *cavity;
    if site.precision.is_nan() || site.precision_mean.is_nan() {
        return None;
    }
    if site.precision < MIN_SITE_PRECISION {
        site.precision = MIN_SITE_PRECISION;
    }
    Some(site)
}

impl Factor for GaussianFactor {
    type Message = GaussianMessage;
    type Parameters = GaussianFactorParameters;

    #[inline(always)]
    fn degree(&self) -> usize {
        match self {
            GaussianFactor::Transition { .. } => 2,
            GaussianFactor::Prior { .. } | GaussianFactor::Probit { .. } => 1,
        }
    }

    #[inline(always)]
    fn send_messages(
        &self,
        src: &[Self::Message],
        dst: &mut [Self::Message],
        parameters: &GaussianFactorParameters,
    ) {
        let damping = parameters.damping;
        match self {
            GaussianFactor::Prior { mean, variance } => {
                dst[0] = GaussianMessage::from_moments(*mean, *variance);
            }
            GaussianFactor::Transition { variance } => {
                dst[1] = convolve(&src[0], *variance).damp(&dst[1], damping);
                dst[0] = convolve(&src[1], *variance).damp(&dst[0], damping);
            }
            GaussianFactor::Probit { observation } => {
                if let Some(site) = probit_site(&src[0], *observation) {
                    dst[0] = site.damp(&dst[0], damping);
                }
            }
        }
    }
}
