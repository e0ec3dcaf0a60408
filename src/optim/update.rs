//! Velocity and position dynamics of one iteration.
//!
//! The leader of the last evaluation only keeps its damped momentum,
//! `v = w * v`. Every other particle follows
//!
//! v = w * v + c1 * r1 * (p_best - x) + c2 * r2 * gate * (g_best - x)
//!
//! where `gate` is a Bernoulli(0.5) mask that randomly switches the social pull
//! off per dimension. Velocities are clamped to the per-dimension cap, positions
//! move by the velocity, integer dimensions are rounded and positions are
//! clipped into the bounds.

use ndarray::{Array2, ArrayView1};
use rand::Rng;

use super::rng::RandomStreams;
use super::swarm::Swarm;
use super::tracker::BestTracker;
use super::variables::DecodedVariables;

/// Weight of the pull towards a particle's own best position.
pub const COGNITIVE_COEFF: f64 = 1.49445;
/// Weight of the pull towards the swarm's best position.
pub const SOCIAL_COEFF: f64 = 1.49445;

/// Random numbers consumed by one iteration.
#[derive(Debug, Clone)]
pub struct IterationDraws {
    /// `swarm_size × dim`, cognitive stream
    pub r1: Array2<f64>,
    /// `swarm_size × dim`, social stream
    pub r2: Array2<f64>,
    /// `(swarm_size - 1) × dim`, social stream. Row `k` belongs to the k-th non-leader
    pub gate: Array2<bool>,
}

impl IterationDraws {
    /// Draws all random numbers of an iteration in a fixed order.
    pub fn draw(swarm_size: usize, dim: usize, streams: &mut RandomStreams) -> Self {
        let r1 = Array2::from_shape_fn((swarm_size, dim), |_| streams.cognitive.gen::<f64>());
        let r2 = Array2::from_shape_fn((swarm_size, dim), |_| streams.social.gen::<f64>());
        let gate = Array2::from_shape_fn((swarm_size - 1, dim), |_| streams.social.gen_bool(0.5));
        Self { r1, r2, gate }
    }
}

/// Computes the new velocities and clamps them to the velocity cap.
///
/// # Arguments
///
/// * `swarm` - Swarm whose velocities are updated in place
/// * `weights` - Inertia weights, one row per particle
/// * `tracker` - Personal and global bests
/// * `draws` - Random numbers of this iteration
/// * `leader` - Index of the current best particle
pub fn update_velocities(
    swarm: &mut Swarm,
    weights: &Array2<f64>,
    tracker: &BestTracker,
    draws: &IterationDraws,
    leader: usize,
) {
    let personal_best = tracker.personal_best();
    let global_best: ArrayView1<f64> = tracker.global_best();

    for i in 0..swarm.size() {
        if i == leader {
            for d in 0..swarm.dim() {
                swarm.velocities[[i, d]] *= weights[[i, d]];
            }
        } else {
            let gate_row = if i < leader { i } else { i - 1 };
            for d in 0..swarm.dim() {
                let x = swarm.positions[[i, d]];
                let gate = if draws.gate[[gate_row, d]] { 1.0 } else { 0.0 };
                let cognitive = COGNITIVE_COEFF * draws.r1[[i, d]] * (personal_best[[i, d]] - x);
                let social = SOCIAL_COEFF * draws.r2[[i, d]] * gate * (global_best[d] - x);
                swarm.velocities[[i, d]] =
                    weights[[i, d]] * swarm.velocities[[i, d]] + cognitive + social;
            }
        }
    }

    for mut row in swarm.velocities.rows_mut() {
        for (v, &cap) in row.iter_mut().zip(swarm.max_velocity.iter()) {
            *v = v.max(-cap).min(cap);
        }
    }
}

/// Moves every particle by its velocity and enforces the variable types and bounds.
///
/// Integer dimensions are rounded to the nearest integer (ties to even) before
/// positions are clipped into `[lower, upper]`.
pub fn move_particles(swarm: &mut Swarm, variables: &DecodedVariables) {
    swarm.positions += &swarm.velocities;

    for mut row in swarm.positions.rows_mut() {
        for (d, x) in row.iter_mut().enumerate() {
            if variables.is_integer(d) {
                *x = x.round_ties_even();
            }
            *x = x.max(variables.lower()[d]).min(variables.upper()[d]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::variables::VariableSpec;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    fn swarm(positions: Array2<f64>, velocities: Array2<f64>, cap: Array1<f64>) -> Swarm {
        Swarm {
            positions,
            velocities,
            max_velocity: cap,
        }
    }

    fn ones_draws(swarm_size: usize, dim: usize, gate: bool) -> IterationDraws {
        IterationDraws {
            r1: Array2::ones((swarm_size, dim)),
            r2: Array2::ones((swarm_size, dim)),
            gate: Array2::from_elem((swarm_size - 1, dim), gate),
        }
    }

    #[test]
    fn test_draw_shapes() {
        let mut streams = RandomStreams::seeded(3);
        let draws = IterationDraws::draw(5, 2, &mut streams);

        assert_eq!(draws.r1.dim(), (5, 2));
        assert_eq!(draws.r2.dim(), (5, 2));
        assert_eq!(draws.gate.dim(), (4, 2));
        assert!(draws.r1.iter().all(|r| (0.0..1.0).contains(r)));
    }

    #[test]
    fn test_leader_keeps_damped_momentum() {
        let positions = array![[0.0], [1.0]];
        let tracker = BestTracker::new(&array![[5.0], [1.0]], &array![1.0, 0.0]);
        let mut swarm = swarm(positions, array![[0.0], [2.0]], array![100.0]);

        let weights = array![[0.5], [0.5]];
        update_velocities(&mut swarm, &weights, &tracker, &ones_draws(2, 1, true), 1);

        // Leader: no pull at all
        assert_relative_eq!(swarm.velocities[[1, 0]], 1.0);
        // Follower: cognitive (5 - 0) and social (5 - 0), both with r = 1
        assert_relative_eq!(swarm.velocities[[0, 0]], 2.0 * COGNITIVE_COEFF * 5.0);
    }

    #[test]
    fn test_gate_disables_social_term() {
        let tracker = BestTracker::new(&array![[0.0], [4.0]], &array![0.0, 1.0]);
        let mut swarm = swarm(array![[1.0], [4.0]], Array2::zeros((2, 1)), array![100.0]);

        let weights = Array2::ones((2, 1));
        update_velocities(&mut swarm, &weights, &tracker, &ones_draws(2, 1, false), 1);

        // Only the cognitive pull towards p_best = 0.0 remains
        assert_relative_eq!(swarm.velocities[[0, 0]], -COGNITIVE_COEFF);
    }

    #[test]
    fn test_gate_rows_skip_leader() {
        let tracker = BestTracker::new(&array![[0.0], [0.0], [0.0]], &array![0.0, 1.0, 0.0]);
        let mut swarm = swarm(
            array![[1.0], [0.0], [1.0]],
            Array2::zeros((3, 1)),
            array![100.0],
        );
        let mut draws = ones_draws(3, 1, false);
        // Second gate row belongs to particle 2, the leader being particle 1
        draws.gate[[1, 0]] = true;

        update_velocities(&mut swarm, &Array2::ones((3, 1)), &tracker, &draws, 1);

        assert_relative_eq!(swarm.velocities[[0, 0]], -COGNITIVE_COEFF);
        assert_relative_eq!(
            swarm.velocities[[2, 0]],
            -COGNITIVE_COEFF - SOCIAL_COEFF
        );
    }

    #[test]
    fn test_velocity_is_clamped() {
        let tracker = BestTracker::new(&array![[10.0, -10.0], [0.0, 0.0]], &array![1.0, 0.0]);
        let mut swarm = swarm(
            array![[0.0, 0.0], [0.0, 0.0]],
            array![[0.0, 0.0], [9.0, -9.0]],
            array![0.5, 0.25],
        );

        update_velocities(&mut swarm, &Array2::ones((2, 2)), &tracker, &ones_draws(2, 2, true), 1);

        assert_eq!(swarm.velocities, array![[0.5, -0.25], [0.5, -0.25]]);
    }

    #[test]
    fn test_move_rounds_then_clips() {
        let variables =
            DecodedVariables::decode(&[VariableSpec::real(0.0, 1.0), VariableSpec::integer(0.0, 10.0)])
                .unwrap();
        let mut swarm = swarm(
            array![[0.9, 2.0], [0.1, 9.0], [0.5, 3.0]],
            array![[0.3, 0.5], [-0.3, 1.6], [0.0, 0.4]],
            array![1.0, 1.0],
        );

        move_particles(&mut swarm, &variables);

        // 2.5 rounds to even, 10.6 rounds to 11 and is clipped to 10
        assert_eq!(
            swarm.positions,
            array![[1.0, 2.0], [0.0, 10.0], [0.5, 3.0]]
        );
    }
}
