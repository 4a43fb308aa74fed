use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::error::{SsmError, SsmResult};

/// Parameters of a probit state space model, of data simulation and of
/// expectation propagation. Every field has a default value, so a partial
/// YAML document is a valid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbitSsmConfig {
    /// Number of time steps
    pub steps: usize,

    /// Seed of the data simulation
    pub seed: u64,

    /// Variance of a random walk step
    pub transition_variance: f64,

    /// Prior mean of the first state, also the starting point of simulation
    pub initial_mean: f64,

    /// Prior variance of the first state
    pub initial_variance: f64,

    /// Number of message passing iterations, or the maximal number of
    /// iterations when `threshold` is set
    pub iterations: usize,

    /// Damping of factor messages
    pub damping: f64,

    /// Convergence threshold, when absent exactly `iterations` iterations are run
    pub threshold: Option<f64>,
}

impl Default for ProbitSsmConfig {
    fn default() -> Self {
        ProbitSsmConfig {
            steps: 40,
            seed: 1,
            transition_variance: 1f64,
            initial_mean: 0f64,
            initial_variance: 100f64,
            iterations: 20,
            damping: 0f64,
            threshold: None,
        }
    }
}

fn check_variance(field: &'static str, value: f64) -> SsmResult<()> {
    if value.is_finite() && value > 0f64 {
        Ok(())
    } else {
        Err(SsmError::InvalidConfig(
            field,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

impl ProbitSsmConfig {
    /// Parses a configuration from a YAML document and validates it
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::ssm::ProbitSsmConfig;
    ///
    /// let config = ProbitSsmConfig::from_yaml("steps: 10\nthreshold: 1.0e-8\n").unwrap();
    /// assert_eq!(config.steps, 10);
    /// assert_eq!(config.threshold, Some(1e-8));
    /// assert_eq!(config.iterations, ProbitSsmConfig::default().iterations);
    /// ```
    pub fn from_yaml(document: &str) -> SsmResult<Self> {
        let config: ProbitSsmConfig = serde_yaml::from_str(document)
            .map_err(|err| SsmError::ConfigParse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> SsmResult<Self> {
        let document = fs::read_to_string(path.as_ref()).map_err(|err| {
            SsmError::ConfigParse(format!("{}: {}", path.as_ref().display(), err))
        })?;
        Self::from_yaml(&document)
    }

    /// Serializes a configuration to YAML
    pub fn to_yaml(&self) -> SsmResult<String> {
        serde_yaml::to_string(self).map_err(|err| SsmError::Serialization(err.to_string()))
    }

    /// Checks that all the values are in their valid ranges
    pub fn validate(&self) -> SsmResult<()> {
        if self.steps == 0 {
            return Err(SsmError::InvalidConfig(
                "steps",
                "must be at least 1".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(SsmError::InvalidConfig(
                "iterations",
                "must be at least 1".to_string(),
            ));
        }
        check_variance("transition_variance", self.transition_variance)?;
        check_variance("initial_variance", self.initial_variance)?;
        if !self.initial_mean.is_finite() {
            return Err(SsmError::InvalidConfig(
                "initial_mean",
                format!("must be finite, got {}", self.initial_mean),
            ));
        }
        if !(0f64..1f64).contains(&self.damping) {
            return Err(SsmError::InvalidConfig(
                "damping",
                format!("must lie in [0, 1), got {}", self.damping),
            ));
        }
        if let Some(threshold) = self.threshold {
            if !(threshold > 0f64) {
                return Err(SsmError::InvalidConfig(
                    "threshold",
                    format!("must be positive, got {}", threshold),
                ));
            }
        }
        Ok(())
    }
}
