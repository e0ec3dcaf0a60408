//! The problem a run solves.
//!
//! Couples the decoded search space with the data bundle and the objective and
//! assembles the full parameter vector for every evaluation.

use ndarray::ArrayView1;

use crate::objective::{data::DataBundle, error::ObjectiveError, objfun::Objective};

use super::error::OptimizeError;
use super::variables::{DecodedVariables, VariableSpec};

/// An optimization problem: a search space, the data and the objective.
///
/// The problem owns the data bundle and the objective for the duration of a
/// run. Both are only ever accessed through shared references.
///
/// # Type Parameters
///
/// * `D` - Type of the data matrices
/// * `L` - Type of the label vectors
/// * `O` - The objective function
#[derive(Debug, Clone)]
pub struct Problem<D, L, O> {
    variables: DecodedVariables,
    data: DataBundle<D, L>,
    objective: O,
}

impl<D, L, O: Objective<D, L>> Problem<D, L, O> {
    /// Creates a new problem from a variable table.
    ///
    /// # Arguments
    /// * `variables` - One specification per parameter of the objective
    /// * `data` - Train/test partitions passed to the objective
    /// * `objective` - Function to maximize
    ///
    /// # Errors
    /// Returns a configuration error if the variable table cannot be decoded.
    pub fn new(
        variables: &[VariableSpec],
        data: DataBundle<D, L>,
        objective: O,
    ) -> Result<Self, OptimizeError> {
        Ok(Self {
            variables: DecodedVariables::decode(variables)?,
            data,
            objective,
        })
    }

    pub fn variables(&self) -> &DecodedVariables {
        &self.variables
    }

    pub fn data(&self) -> &DataBundle<D, L> {
        &self.data
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Assembles the full parameter vector: fixed constants first, then the
    /// optimizable values in table order.
    pub fn full_params(&self, position: ArrayView1<'_, f64>) -> Vec<f64> {
        let mut params = Vec::with_capacity(self.variables.full_len());
        params.extend(self.variables.constants().iter());
        params.extend(position.iter());
        params
    }

    /// Scores a single position with the objective.
    pub fn evaluate(&self, position: ArrayView1<'_, f64>) -> Result<f64, ObjectiveError> {
        self.objective
            .evaluate_bundle(&self.data, &self.full_params(position))
    }
}
