//! Asymmetric inertia weight adaptation.

use ndarray::{Array2, ArrayView1};

use super::params::PsoParams;

/// Per-particle inertia weights and their adaptation schedule.
///
/// While the iteration counter is within the vary window, the weights of the
/// current leader grow by the decay rate and the weights of every other
/// particle shrink by it. Once the window closes the weights stay wherever they
/// ended up. There is no clamping and no reset.
#[derive(Debug, Clone)]
pub struct InertiaSchedule {
    /// `swarm_size × dim`, updated uniformly across a particle's row
    weights: Array2<f64>,
    decay_rate: f64,
    /// Last iteration (inclusive) in which weights change
    vary_for: usize,
}

impl InertiaSchedule {
    /// Creates the schedule with every weight set to `w_start`.
    ///
    /// # Arguments
    ///
    /// * `swarm_size` - Number of particles
    /// * `dim` - Number of optimizable dimensions
    /// * `params` - Swarm parameters supplying `w_start`, `w_end` and the vary window
    pub fn new(swarm_size: usize, dim: usize, params: &PsoParams) -> Self {
        Self {
            weights: Array2::from_elem((swarm_size, dim), params.w_start),
            decay_rate: params.decay_rate(),
            vary_for: params.vary_for(),
        }
    }

    /// Whether `iteration` still lies within the vary window.
    pub fn is_varying(&self, iteration: usize) -> bool {
        iteration <= self.vary_for
    }

    /// Applies one step of the asymmetric schedule.
    ///
    /// # Arguments
    ///
    /// * `iteration` - Current iteration counter
    /// * `leader` - Index of the particle with the highest fitness in the last evaluation
    pub fn update(&mut self, iteration: usize, leader: usize) {
        if !self.is_varying(iteration) {
            return;
        }

        for (i, mut row) in self.weights.rows_mut().into_iter().enumerate() {
            if i == leader {
                row += self.decay_rate;
            } else {
                row -= self.decay_rate;
            }
        }
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Weights of a single particle.
    pub fn row(&self, particle: usize) -> ArrayView1<'_, f64> {
        self.weights.row(particle)
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn vary_for(&self) -> usize {
        self.vary_for
    }
}
