//! Scoring of a whole swarm.
//!
//! Evaluation runs after all random numbers of an iteration have been drawn, so
//! the order in which particles are scored has no influence on the random
//! streams. [`Sequential`] scores particles one at a time in index order,
//! [`Parallel`] distributes them over the rayon thread pool.

use log::warn;
use ndarray::{Array1, Array2};
use rayon::prelude::*;

use crate::objective::{error::ObjectiveError, objfun::Objective};

use super::error::{OptimizeError, Stage};
use super::problem::Problem;
use super::tracker::sanitize_fitness;

/// Strategy for scoring every particle of the swarm.
pub trait SwarmEvaluator<D, L, O> {
    /// Writes the sanitized fitness of every row of `positions` into `fitness`.
    ///
    /// # Arguments
    /// * `problem` - The problem whose objective is called
    /// * `positions` - One row per particle
    /// * `fitness` - Output buffer, one entry per particle
    /// * `stage` - Point of the run, used in error reports
    ///
    /// # Returns
    /// * `Result<usize, OptimizeError>` - Number of non-finite objective values
    ///
    /// # Errors
    /// Returns `OptimizeError::Objective` for the lowest-index particle whose
    /// evaluation failed.
    fn evaluate(
        &self,
        problem: &Problem<D, L, O>,
        positions: &Array2<f64>,
        fitness: &mut Array1<f64>,
        stage: Stage,
    ) -> Result<usize, OptimizeError>;
}

/// Scores particles one after another in index order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequential;

/// Scores particles concurrently on the rayon thread pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct Parallel;

impl<D, L, O: Objective<D, L>> SwarmEvaluator<D, L, O> for Sequential {
    fn evaluate(
        &self,
        problem: &Problem<D, L, O>,
        positions: &Array2<f64>,
        fitness: &mut Array1<f64>,
        stage: Stage,
    ) -> Result<usize, OptimizeError> {
        let mut non_finite = 0;
        for (particle, position) in positions.rows().into_iter().enumerate() {
            let value = problem.evaluate(position);
            non_finite += store(fitness, particle, value, stage)?;
        }
        Ok(non_finite)
    }
}

impl<D, L, O> SwarmEvaluator<D, L, O> for Parallel
where
    D: Sync,
    L: Sync,
    O: Objective<D, L> + Sync,
{
    fn evaluate(
        &self,
        problem: &Problem<D, L, O>,
        positions: &Array2<f64>,
        fitness: &mut Array1<f64>,
        stage: Stage,
    ) -> Result<usize, OptimizeError> {
        let values: Vec<Result<f64, ObjectiveError>> = (0..positions.nrows())
            .into_par_iter()
            .map(|particle| problem.evaluate(positions.row(particle)))
            .collect();

        let mut non_finite = 0;
        for (particle, value) in values.into_iter().enumerate() {
            non_finite += store(fitness, particle, value, stage)?;
        }
        Ok(non_finite)
    }
}

/// Stores one objective result, returning 1 if it had to be sanitized.
fn store(
    fitness: &mut Array1<f64>,
    particle: usize,
    value: Result<f64, ObjectiveError>,
    stage: Stage,
) -> Result<usize, OptimizeError> {
    let value = value.map_err(|source| OptimizeError::Objective {
        stage,
        particle,
        source,
    })?;

    fitness[particle] = sanitize_fitness(value);
    if value.is_finite() {
        Ok(0)
    } else {
        warn!("Objective returned {value} for particle {particle} during {stage}, ranking it as -inf");
        Ok(1)
    }
}
