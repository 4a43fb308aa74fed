use std::{error::Error, fmt::Display};

use crate::core::{FGBuilderError, FGError};

// ------------------------------------------------------------------------------------------

#[derive(Debug)]
/// Errors that could appear while configuring or running inference
/// in a probit state space model
pub enum SsmError {
    /// A configuration value is invalid, contains the field name and a reason
    InvalidConfig(&'static str, String),

    /// A configuration could not be read or parsed
    ConfigParse(String),

    /// A value could not be serialized
    Serialization(String),

    /// There are no observations to condition on
    EmptyObservations,

    /// A factor graph could not be built
    Builder(FGBuilderError),

    /// Message passing has failed
    MessagePassing(FGError),
}

impl Display for SsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SsmError::InvalidConfig(field, reason) => {
                write!(f, "Invalid configuration value of `{}`: {}", field, reason)
            }
            SsmError::ConfigParse(reason) => {
                write!(f, "Unable to read a configuration: {}", reason)
            }
            SsmError::Serialization(reason) => write!(f, "Unable to serialize: {}", reason),
            SsmError::EmptyObservations => {
                write!(f, "A state space model needs at least one observation")
            }
            SsmError::Builder(err) => write!(f, "Unable to build a factor graph: {}", err),
            SsmError::MessagePassing(err) => write!(f, "Inference has failed: {}", err),
        }
    }
}

impl Error for SsmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SsmError::Builder(err) => Some(err),
            SsmError::MessagePassing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FGBuilderError> for SsmError {
    fn from(err: FGBuilderError) -> Self {
        SsmError::Builder(err)
    }
}

impl From<FGError> for SsmError {
    fn from(err: FGError) -> Self {
        SsmError::MessagePassing(err)
    }
}

/// Result type of state space model routines
pub type SsmResult<T> = Result<T, SsmError>;
