pub(crate) mod factor;
mod initializers;
mod message;
pub mod numerics;
pub mod schedulers;
mod variable;

pub use factor::GaussianFactor;
pub use initializers::{new_gaussian_builder, random_message_initializer, vague_message_initializer};
pub use message::{Gaussian, GaussianMessage};
pub use schedulers::GaussianFactorParameters;
pub use variable::GaussianVariable;
