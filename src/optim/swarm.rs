//! Swarm state and its initialization.
//!
//! Positions and velocities are stored as dense `swarm_size × dim` matrices.
//! Each row belongs to one particle.

use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, Rng};
use serde::Serialize;

use super::error::OptimizeError;
use super::variables::DecodedVariables;

/// Snapshot of a single particle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub personal_best: Vec<f64>,
    pub personal_best_fitness: f64,
}

/// Positions, velocities and velocity caps of all particles.
#[derive(Debug, Clone)]
pub struct Swarm {
    pub(crate) positions: Array2<f64>,
    pub(crate) velocities: Array2<f64>,
    /// Per-dimension cap, shared by every particle
    pub(crate) max_velocity: Array1<f64>,
}

impl Swarm {
    /// Draws the initial swarm.
    ///
    /// Real dimensions are drawn uniformly from `[lower, upper]` and integer
    /// dimensions uniformly from the integers in `[lower, upper)`. Velocities
    /// start at zero. If a warm start is given, it replaces the last particle.
    ///
    /// # Arguments
    ///
    /// * `variables` - The decoded search space
    /// * `swarm_size` - Number of particles
    /// * `warm_start` - Optional position injected into the last slot
    /// * `rng` - Initialization stream
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the swarm has fewer than two particles
    /// or the warm start does not fit the search space.
    pub fn initialize(
        variables: &DecodedVariables,
        swarm_size: usize,
        warm_start: Option<&[f64]>,
        rng: &mut StdRng,
    ) -> Result<Self, OptimizeError> {
        if swarm_size < 2 {
            return Err(OptimizeError::SwarmTooSmall(swarm_size));
        }
        if let Some(warm_start) = warm_start {
            variables.validate_warm_start(warm_start)?;
        }

        let dim = variables.dim();
        let mut positions = Array2::zeros((swarm_size, dim));

        // Column by column, one draw per particle
        for (d, mut column) in positions.columns_mut().into_iter().enumerate() {
            let (lower, upper) = (variables.lower()[d], variables.upper()[d]);
            if variables.is_integer(d) {
                let (lo, hi) = (lower as i64, upper as i64);
                column.map_inplace(|x| *x = rng.gen_range(lo..hi) as f64);
            } else {
                column.map_inplace(|x| *x = lower + (upper - lower) * rng.gen::<f64>());
            }
        }

        if let Some(warm_start) = warm_start {
            positions
                .row_mut(swarm_size - 1)
                .assign(&Array1::from_vec(warm_start.to_vec()));
        }

        Ok(Self {
            positions,
            velocities: Array2::zeros((swarm_size, dim)),
            max_velocity: variables.max_velocity(),
        })
    }

    /// Number of particles.
    pub fn size(&self) -> usize {
        self.positions.nrows()
    }

    /// Number of optimizable dimensions.
    pub fn dim(&self) -> usize {
        self.positions.ncols()
    }

    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    pub fn velocities(&self) -> &Array2<f64> {
        &self.velocities
    }

    pub fn max_velocity(&self) -> &Array1<f64> {
        &self.max_velocity
    }
}
