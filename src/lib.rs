/// A module containing general logic of factor graphs
pub mod core;
/// A module containing Gaussian messages and expectation propagation update rules
pub mod gaussian;
/// A module containing a linear Gaussian state space model with probit observations
pub mod ssm;

#[cfg(test)]
mod tests;
