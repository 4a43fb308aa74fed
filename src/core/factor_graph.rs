use std::{error::Error, fmt::Display};

use log::{debug, trace};
use rayon::prelude::{IntoParallelRefMutIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::{
    core::factor::Factor, core::factor_node::FactorNode, core::variable::Variable,
    core::variable_node::VariableNode,
};

// ------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Errors that could appear in factor graph's methods
pub enum FGError {
    /// Message passing error appearing when a message passing does not converge
    MessagePassingError {
        /// Number of iterations past before failure
        iterations_number: usize,

        /// Final discrepancy between last and previous iteration's messages maximized across variables and factors
        last_discrepancy: f64,

        /// Dynamics of discrepancy before failure
        discrepancy_dynamics: Vec<f64>,
    },

    /// Index of a variable is out of range
    OutOfRangeVariable(usize, usize),
}

impl Display for FGError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FGError::MessagePassingError {
                iterations_number,
                last_discrepancy,
                discrepancy_dynamics: _,
            } => write!(
                f,
                "Messaged passing has not converged after {} iterations, last iteration discrepancy: {}",
                iterations_number,
                last_discrepancy,
            ),
            FGError::OutOfRangeVariable(size, pos) => write!(
                f,
                "Index of a variable {} is out of range of [0..{}] variables",
                pos, size,
            ),
        }
    }
}

impl Error for FGError {}

/// Information returned after a message passing procedure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePassingInfo {
    /// Number of performed iterations
    pub iterations_number: usize,

    /// Final discrepancy between last and previous iteration's messages maximized across variables and factors
    pub last_discrepancy: f64,

    /// Discrepancy per iteration
    pub discrepancy_dynamics: Vec<f64>,
}

impl Display for MessagePassingInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Messaged passing has finished after {} iterations, last iteration discrepancy: {}",
            self.iterations_number, self.last_discrepancy,
        )
    }
}

/// Factor graph's methods result type
pub type FGResult<T> = Result<T, FGError>;

// ------------------------------------------------------------------------------------------

/// A factor graph
#[derive(Debug)]
pub struct FactorGraph<F, V>
where
    F: Factor,
    V: Variable<Message = F::Message>,
{
    pub(crate) factors: Vec<FactorNode<F, V>>,
    pub(crate) variables: Vec<VariableNode<V, F>>,
}

impl<F, V> Clone for FactorGraph<F, V>
where
    F: Factor + Clone,
    V: Variable<Message = F::Message> + Clone,
{
    fn clone(&self) -> Self {
        let mut factors = self.factors.clone();
        let mut variables = self.variables.clone();
        for factor in &mut factors {
            factor.init_senders(&mut variables);
        }
        for variable in &mut variables {
            variable.init_senders(&mut factors);
        }
        FactorGraph { factors, variables }
    }
}

impl<F, V> FactorGraph<F, V>
where
    F: Factor,
    V: Variable<Message = F::Message>,
{
    /// Returns the number of variables
    #[inline]
    pub fn variables_number(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of factors
    #[inline]
    pub fn factors_number(&self) -> usize {
        self.factors.len()
    }

    /// Returns degree (number of adjoint factors) of each variable
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable, vague_message_initializer};
    ///
    /// let mut initializer = vague_message_initializer(1e12);
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(2, 2);
    /// fgb.add_factor(GaussianFactor::transition(1.), &[0, 1], &mut initializer).unwrap();
    /// fgb.add_factor(GaussianFactor::probit(false), &[1], &mut initializer).unwrap();
    /// let fg = fgb.build();
    /// assert_eq!(fg.get_variable_degrees(), vec![1, 2]);
    /// ```
    #[inline]
    pub fn get_variable_degrees(&self) -> Vec<usize> {
        self.variables.iter().map(|x| x.degree()).collect()
    }

    /// Returns degree (number of adjoint variables) of each factor
    /// in order they were added to a factor graph
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable, vague_message_initializer};
    ///
    /// let mut initializer = vague_message_initializer(1e12);
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(2, 2);
    /// fgb.add_factor(GaussianFactor::transition(1.), &[0, 1], &mut initializer).unwrap();
    /// fgb.add_factor(GaussianFactor::probit(false), &[1], &mut initializer).unwrap();
    /// let fg = fgb.build();
    /// assert_eq!(fg.get_factor_degrees(), vec![2, 1]);
    /// ```
    #[inline]
    pub fn get_factor_degrees(&self) -> Vec<usize> {
        self.factors.iter().map(|x| x.degree()).collect()
    }

    /// Performs a single sweep of the flooding schedule: all factors
    /// update their outgoing messages in parallel, then all variables do.
    /// Returns the discrepancy between new and previous messages
    /// maximized across variables and factors.
    ///
    /// # Arguments
    ///
    /// * `factor_parameters` - Hyper-parameters of a factor's messages update rule
    /// * `variable_parameters` - Hyper-parameters of a variable's messages update rule
    #[inline]
    pub fn step(
        &mut self,
        factor_parameters: &F::Parameters,
        variable_parameters: &V::Parameters,
    ) -> f64 {
        let factors_discrepancy = self
            .factors
            .par_iter_mut()
            .map(|factor| {
                factor.eval_messages(factor_parameters);
                let max_discrepancy = factor.eval_discrepancy();
                factor.send_messages();
                max_discrepancy
            })
            .reduce(|| 0f64, |x, y| x.max(y));
        let variables_discrepancy = self
            .variables
            .par_iter_mut()
            .map(|variable| {
                variable.eval_messages(variable_parameters);
                let max_discrepancy = variable.eval_discrepancy();
                variable.send_messages();
                max_discrepancy
            })
            .reduce(|| 0f64, |x, y| x.max(y));
        factors_discrepancy.max(variables_discrepancy)
    }

    /// Runs exactly `iterations_number` sweeps of message passing without
    /// checking a convergence criterion.
    ///
    /// # Arguments
    ///
    /// * `iterations_number` - A number of sweeps
    /// * `factor_scheduler` - A scheduler of a factor's messages update rule hyper-parameters.
    ///     It takes an iteration number (starts from 0) and return hyper-parameters.
    /// * `variable_scheduler` - A scheduler of a variable's messages update rule hyper-parameters.
    ///     It takes an iteration number (starts from 0) and return hyper-parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable, vague_message_initializer};
    /// use gmrs_ep::gaussian::schedulers::{get_standard_factor_scheduler, get_standard_variable_scheduler};
    ///
    /// let mut initializer = vague_message_initializer(1e12);
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(1, 2);
    /// fgb.add_factor(GaussianFactor::prior(0., 1.), &[0], &mut initializer).unwrap();
    /// fgb.add_factor(GaussianFactor::probit(true), &[0], &mut initializer).unwrap();
    /// let mut fg = fgb.build();
    /// let info = fg.run_iterations(
    ///     10,
    ///     &get_standard_factor_scheduler(0.),
    ///     &get_standard_variable_scheduler(0.),
    /// );
    /// assert_eq!(info.iterations_number, 10);
    /// assert!(fg.variable_marginals()[0].mean > 0.);
    /// ```
    pub fn run_iterations(
        &mut self,
        iterations_number: usize,
        factor_scheduler: &impl Fn(usize) -> F::Parameters,
        variable_scheduler: &impl Fn(usize) -> V::Parameters,
    ) -> MessagePassingInfo {
        let mut discrepancy_dynamics = Vec::with_capacity(iterations_number);
        let mut last_discrepancy = f64::MAX;
        for i in 0..iterations_number {
            last_discrepancy = self.step(&factor_scheduler(i), &variable_scheduler(i));
            trace!("iteration {i}: discrepancy {last_discrepancy}");
            discrepancy_dynamics.push(last_discrepancy);
        }
        debug!("{iterations_number} message passing iterations done, last discrepancy {last_discrepancy}");
        MessagePassingInfo {
            iterations_number,
            last_discrepancy,
            discrepancy_dynamics,
        }
    }

    /// Runs a message passing algorithm in parallel. Typically, it is
    /// a fixed point iteration method targeted on achieving an equilibrium
    /// configuration of messages. This method mutates a factor graph
    /// since it updates messages that are stored internally.
    ///
    /// # Arguments
    ///
    /// * `max_iterations_number` - A maximal number of iterations, if a process
    ///     does not converge before reaching this number of iterations, it fails
    /// * `min_iterations_number` - A minimal number of iterations that is performed
    ///     disregards reaching the convergence criterion
    /// * `threshold` - A threshold specifying the convergence criterion. A process
    ///     is considered as successful if the discrepancy between two subsequent
    ///     messages configurations is less than the threshold
    /// * `factor_scheduler` - A scheduler of a factor's messages update rule hyper-parameters.
    ///     It takes an iteration number (starts from 0) and return hyper-parameters.
    /// * `variable_scheduler` - A scheduler of a variable's messages update rule hyper-parameters.
    ///     It takes an iteration number (starts from 0) and return hyper-parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable, vague_message_initializer};
    /// use gmrs_ep::gaussian::schedulers::{get_standard_factor_scheduler, get_standard_variable_scheduler};
    ///
    /// let mut initializer = vague_message_initializer(1e12);
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(3, 4);
    /// fgb.add_factor(GaussianFactor::prior(0., 1.), &[0], &mut initializer).unwrap();
    /// for i in 0..2 {
    ///     fgb.add_factor(GaussianFactor::transition(0.5), &[i, i + 1], &mut initializer).unwrap();
    /// }
    /// fgb.add_factor(GaussianFactor::prior(1., 0.1), &[2], &mut initializer).unwrap();
    /// let mut fg = fgb.build();
    /// let _ = fg.run_message_passing_parallel(
    ///     100,
    ///     0,
    ///     1e-10,
    ///     &get_standard_factor_scheduler(0.),
    ///     &get_standard_variable_scheduler(0.),
    /// ).unwrap();
    /// ```
    #[inline]
    pub fn run_message_passing_parallel(
        &mut self,
        max_iterations_number: usize,
        min_iterations_number: usize,
        threshold: f64,
        factor_scheduler: &impl Fn(usize) -> F::Parameters,
        variable_scheduler: &impl Fn(usize) -> V::Parameters,
    ) -> FGResult<MessagePassingInfo> {
        let mut last_discrepancy = f64::MAX;
        let mut discrepancy_dynamics = Vec::with_capacity(max_iterations_number);
        for i in 0..max_iterations_number {
            let max_discrepancy = self.step(&factor_scheduler(i), &variable_scheduler(i));
            trace!("iteration {i}: discrepancy {max_discrepancy}");
            discrepancy_dynamics.push(max_discrepancy);
            last_discrepancy = max_discrepancy;
            if (max_discrepancy < threshold) && (i + 1 >= min_iterations_number) {
                debug!(
                    "message passing has converged after {} iterations",
                    i + 1
                );
                return Ok(MessagePassingInfo {
                    iterations_number: i + 1,
                    discrepancy_dynamics,
                    last_discrepancy,
                });
            }
        }
        Err(FGError::MessagePassingError {
            iterations_number: max_iterations_number,
            discrepancy_dynamics,
            last_discrepancy,
        })
    }

    /// Computes marginals for all variables
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable, vague_message_initializer};
    /// use gmrs_ep::gaussian::schedulers::{get_standard_factor_scheduler, get_standard_variable_scheduler};
    ///
    /// let mut initializer = vague_message_initializer(1e12);
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(2, 2);
    /// fgb.add_factor(GaussianFactor::prior(2., 1.), &[0], &mut initializer).unwrap();
    /// fgb.add_factor(GaussianFactor::transition(3.), &[0, 1], &mut initializer).unwrap();
    /// let mut fg = fgb.build();
    /// let _ = fg.run_message_passing_parallel(
    ///     100,
    ///     0,
    ///     1e-10,
    ///     &get_standard_factor_scheduler(0.),
    ///     &get_standard_variable_scheduler(0.),
    /// ).unwrap();
    ///
    /// // Validation
    /// let marginals = fg.variable_marginals();
    /// assert!((marginals[1].mean - 2.).abs() < 1e-8);
    /// assert!((marginals[1].variance - 4.).abs() < 1e-8);
    /// ```
    #[inline]
    pub fn variable_marginals(&self) -> Vec<V::Marginal> {
        self.variables.iter().map(|x| x.marginal()).collect()
    }

    /// Computes a marginal of a single variable
    ///
    /// # Arguments
    ///
    /// * `var_index` - The index of a variable
    #[inline]
    pub fn variable_marginal(&self, var_index: usize) -> FGResult<V::Marginal> {
        self.variables
            .get(var_index)
            .map(|x| x.marginal())
            .ok_or(FGError::OutOfRangeVariable(self.variables.len(), var_index))
    }
}
