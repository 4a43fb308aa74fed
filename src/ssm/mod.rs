mod config;
mod error;
mod model;
mod simulation;
mod summary;

pub use config::ProbitSsmConfig;
pub use error::{SsmError, SsmResult};
pub use model::{build_probit_ssm, infer, ProbitSsmGraph, VAGUE_VARIANCE};
pub use simulation::{simulate, Simulation};
pub use summary::PosteriorSummary;
