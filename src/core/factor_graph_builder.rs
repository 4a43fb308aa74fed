use std::{error::Error, fmt::Display, iter::from_fn, ptr::null_mut};

use serde::{Deserialize, Serialize};

use crate::{
    core::factor::Factor, core::factor_graph::FactorGraph, core::factor_node::FactorNode,
    core::variable::Variable, core::variable_node::VariableNode,
};

// ------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Errors that could appear in factor graph builder's methods
pub enum FGBuilderError {
    /// Degree of a factor does not match a number of adjacent variables
    DegreeError(usize, Vec<usize>),

    /// Index of a variable is out of range
    OutOfRangeVariable(usize, usize),
}

impl Display for FGBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FGBuilderError::DegreeError(deg, vars) => write!(
                f,
                "Degree of a factor does not match the number of variables. The factor's degree: {}, the variables list {:?}",
                deg,
                vars,
            ),
            FGBuilderError::OutOfRangeVariable(size, pos) => write!(
                f,
                "ID (index) of a variable {} is out of range of [0..{}] variables",
                pos,
                size,
            ),
        }
    }
}

impl Error for FGBuilderError {}

/// Factor graph builder's methods result type
pub type FGBuilderResult<T> = Result<T, FGBuilderError>;

// public methods ---------------------------------------------------------------------------

#[derive(Debug)]
/// A factor graph builder
pub struct FactorGraphBuilder<F, V>
where
    F: Factor,
    V: Variable<Message = F::Message>,
{
    factors: Vec<FactorNode<F, V>>,
    variables: Vec<VariableNode<V, F>>,
}

impl<F, V> Default for FactorGraphBuilder<F, V>
where
    F: Factor,
    V: Variable<Message = F::Message>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<F, V> FactorGraphBuilder<F, V>
where
    F: Factor,
    V: Variable<Message = F::Message>,
{
    /// Creates an empty factor graph
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable};
    ///
    /// let fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        FactorGraphBuilder {
            factors: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Creates a factor graph with predefined set of variables and
    /// preallocated memory for factors
    ///
    /// # Arguments
    ///
    /// * `variables_number` - A number of variables
    /// * `factors_capacity` - A number of factors we need to preallocate memory for
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable};
    ///
    /// let fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(2, 2);
    /// ```
    #[inline]
    pub fn new_with_variables(variables_number: usize, factors_capacity: usize) -> Self {
        let variables: Vec<_> = from_fn(|| Some(VariableNode::new_disconnected()))
            .take(variables_number)
            .collect();
        let factors = Vec::with_capacity(factors_capacity);
        FactorGraphBuilder { factors, variables }
    }

    /// Adds a variable to a factor graph and returns its index
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable};
    ///
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(0, 1);
    /// assert_eq!(fgb.add_variable(), 0);
    /// assert_eq!(fgb.add_variable(), 1);
    /// ```
    #[inline]
    pub fn add_variable(&mut self) -> usize {
        self.variables.push(VariableNode::new_disconnected());
        self.variables.len() - 1
    }

    /// Returns the current number of variables
    #[inline]
    pub fn variables_number(&self) -> usize {
        self.variables.len()
    }

    /// Adds a factor to a factor graph
    ///
    /// # Arguments
    ///
    /// * `factor` - A new factor
    /// * `var_indices` - Indices of adjoint variables
    /// * `message_initializer` - An object that initializes messages
    ///
    /// # Notes
    ///
    /// If number of `var_indices` does not match a factor degree, the method
    /// returns an error. If an index from `var_indices` is out of range of
    /// the variables list, the method returns an error. In both cases the
    /// builder is left untouched
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable, vague_message_initializer};
    ///
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(10, 1);
    /// let mut initializer = vague_message_initializer(1e12);
    ///
    /// fgb.add_factor(
    ///     GaussianFactor::transition(1.),
    ///     &[3, 8],
    ///     &mut initializer,
    /// ).unwrap();
    /// assert!(fgb.add_factor(GaussianFactor::probit(true), &[10], &mut initializer).is_err());
    /// ```
    #[inline]
    pub fn add_factor(
        &mut self,
        factor: F,
        var_indices: &[usize],
        message_initializer: &mut impl FnMut() -> F::Message,
    ) -> FGBuilderResult<()> {
        let factor_deg = var_indices.len();
        if factor.degree() != factor_deg {
            return Err(FGBuilderError::DegreeError(
                factor.degree(),
                var_indices.to_vec(),
            ));
        }
        let variables_number = self.variables.len();
        if let Some(index) = var_indices.iter().find(|index| **index >= variables_number) {
            return Err(FGBuilderError::OutOfRangeVariable(variables_number, *index));
        }
        let factor_index = self.factors.len();
        let mut factor_node = FactorNode::new_disconnected(factor);
        for index in var_indices {
            let variable = &mut self.variables[*index];
            let factor_message = message_initializer();
            let variable_message = message_initializer();
            factor_node.senders.push(null_mut());
            factor_node.receivers.push(factor_message.clone());
            factor_node.messages.push(variable_message.clone());
            factor_node.var_node_indices.push(*index);
            variable.senders.push(null_mut());
            variable.messages.push(factor_message);
            variable.receivers.push(variable_message);
            variable.fac_node_indices.push(factor_index);
            factor_node
                .var_node_receiver_indices
                .push(variable.receivers.len() - 1);
            variable
                .fac_node_receiver_indices
                .push(factor_node.receivers.len() - 1);
        }
        self.factors.push(factor_node);
        Ok(())
    }

    /// Returns a factor graph
    ///
    /// # Example
    ///
    /// ```
    /// use gmrs_ep::core::FactorGraphBuilder;
    /// use gmrs_ep::gaussian::{GaussianFactor, GaussianVariable, vague_message_initializer};
    ///
    /// let mut fgb = FactorGraphBuilder::<GaussianFactor, GaussianVariable>::new_with_variables(10, 9);
    /// let mut initializer = vague_message_initializer(1e12);
    ///
    /// for i in 0..9 {
    ///    fgb.add_factor(
    ///        GaussianFactor::transition(1.),
    ///        &[i, i + 1],
    ///        &mut initializer,
    ///    ).unwrap();
    /// }
    ///
    /// // Building a factor graph
    /// let fg = fgb.build();
    /// assert_eq!(fg.factors_number(), 9);
    /// ```
    #[inline]
    pub fn build(mut self) -> FactorGraph<F, V> {
        for factor in &mut self.factors {
            factor.init_senders(&mut self.variables);
        }
        for variable in &mut self.variables {
            variable.init_senders(&mut self.factors);
        }
        FactorGraph {
            factors: self.factors,
            variables: self.variables,
        }
    }
}
