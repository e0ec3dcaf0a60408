//! Self-regulating particle swarm optimizer.
//!
//! A particle swarm variant for mixed continuous/integer search spaces with
//! two departures from textbook PSO:
//!
//! - **Asymmetric inertia.** Every particle carries its own inertia weights.
//!   While the vary window is open, the weights of the particle that led the
//!   last evaluation grow by a fixed rate and the weights of all others shrink
//!   by it. After the window the weights stay where they are.
//! - **Gated social term.** The pull towards the global best is switched on
//!   or off per particle and dimension by a fair coin.
//!
//! The leader itself feels no pull at all and only keeps `w * v`.
//!
//! A run is bounded purely by the iteration budget:
//!
//! 1. Decode the variable table and draw the initial swarm
//! 2. Evaluate the swarm and initialize personal and global bests
//! 3. For each iteration: draw random numbers, adapt the inertia weights,
//!    update velocities and positions, evaluate, update bests, record history
//!
//! # Example
//!
//! ```
//! use srpso::prelude::*;
//!
//! let variables = vec![VariableSpec::real(-5.0, 5.0), VariableSpec::integer(0.0, 10.0)];
//! let problem = Problem::new(&variables, DataBundle::empty(), benchmarks::sphere(vec![1.0, 5.0]))
//!     .unwrap();
//!
//! let params = PsoParamsBuilder::default()
//!     .swarm_size(20)
//!     .max_iters(50)
//!     .build()
//!     .unwrap();
//!
//! let report = SRPSO::builder()
//!     .params(params)
//!     .seed(42)
//!     .build()
//!     .optimize(&problem, None, None)
//!     .unwrap();
//!
//! assert_eq!(report.history.len(), 50);
//! ```

use log::{debug, info};
use ndarray::Array1;

use crate::objective::objfun::Objective;
use crate::optim::{
    error::{OptimizeError, Stage},
    evaluator::{Parallel, Sequential, SwarmEvaluator},
    history::History,
    inertia::InertiaSchedule,
    observer::{Observe, SwarmView},
    params::PsoParams,
    problem::Problem,
    report::OptimizationReport,
    rng::RandomStreams,
    swarm::Swarm,
    tracker::BestTracker,
    update::{move_particles, update_velocities, IterationDraws},
};

/// Self-regulating particle swarm optimizer.
///
/// Holds the swarm parameters and the seed. The optimizer itself is stateless
/// between runs, so the same instance can run several problems.
#[derive(Debug, Clone, bon::Builder)]
pub struct SRPSO {
    /// Swarm size, run length and inertia schedule
    pub params: PsoParams,
    /// Seed of the random streams. A fresh seed is drawn per run if absent
    pub seed: Option<u64>,
}

impl SRPSO {
    /// Creates a new optimizer.
    ///
    /// # Arguments
    ///
    /// * `params` - Swarm parameters
    /// * `seed` - Optional seed for reproducible runs
    pub fn new(params: PsoParams, seed: Option<u64>) -> Self {
        Self { params, seed }
    }

    /// Maximizes the problem's objective, evaluating particles sequentially.
    ///
    /// # Arguments
    ///
    /// * `problem` - The problem to solve
    /// * `warm_start` - Optional position injected as the last particle of the initial swarm
    /// * `observer` - Optional observer notified after every iteration
    ///
    /// # Returns
    ///
    /// * `Ok(OptimizationReport)` - Best position, fitness and history of the run
    /// * `Err(OptimizeError)` - Invalid configuration or a failing objective
    pub fn optimize<D, L, O>(
        &self,
        problem: &Problem<D, L, O>,
        warm_start: Option<&[f64]>,
        observer: Option<&mut dyn Observe>,
    ) -> Result<OptimizationReport, OptimizeError>
    where
        O: Objective<D, L>,
    {
        self.run(problem, Sequential, warm_start, observer)
    }

    /// Like [`SRPSO::optimize`], but scores the particles of each iteration in parallel.
    ///
    /// All random numbers are drawn before evaluation, so for a deterministic
    /// objective the result equals that of a sequential run with the same seed.
    pub fn optimize_parallel<D, L, O>(
        &self,
        problem: &Problem<D, L, O>,
        warm_start: Option<&[f64]>,
        observer: Option<&mut dyn Observe>,
    ) -> Result<OptimizationReport, OptimizeError>
    where
        D: Sync,
        L: Sync,
        O: Objective<D, L> + Sync,
    {
        self.run(problem, Parallel, warm_start, observer)
    }

    fn run<D, L, O, E>(
        &self,
        problem: &Problem<D, L, O>,
        evaluator: E,
        warm_start: Option<&[f64]>,
        mut observer: Option<&mut dyn Observe>,
    ) -> Result<OptimizationReport, OptimizeError>
    where
        O: Objective<D, L>,
        E: SwarmEvaluator<D, L, O>,
    {
        self.params.validate()?;

        let variables = problem.variables();
        let (swarm_size, dim) = (self.params.swarm_size, variables.dim());
        let max_iters = self.params.max_iters;

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut streams = RandomStreams::seeded(seed);

        let mut swarm = Swarm::initialize(variables, swarm_size, warm_start, &mut streams.init)?;
        let mut inertia = InertiaSchedule::new(swarm_size, dim, &self.params);

        info!(
            "Starting SRPSO with {swarm_size} particles, {dim} dimensions, {max_iters} iterations (seed {seed})"
        );

        let mut fitness = Array1::from_elem(swarm_size, f64::NEG_INFINITY);
        let mut non_finite =
            evaluator.evaluate(problem, swarm.positions(), &mut fitness, Stage::Initialization)?;
        let mut tracker = BestTracker::new(swarm.positions(), &fitness);

        if let Some(observer) = observer.as_deref_mut() {
            let best_position = tracker.global_best().to_vec();
            observer.observe_init(&best_position, tracker.global_best_fitness());
        }

        let mut history = History::with_capacity(max_iters);

        for iteration in 0..max_iters {
            let leader = tracker.current_best_index();
            let draws = IterationDraws::draw(swarm_size, dim, &mut streams);

            inertia.update(iteration, leader);
            update_velocities(&mut swarm, inertia.weights(), &tracker, &draws, leader);
            move_particles(&mut swarm, variables);

            non_finite += evaluator.evaluate(
                problem,
                swarm.positions(),
                &mut fitness,
                Stage::Iteration(iteration),
            )?;

            if tracker.update(swarm.positions(), &fitness) {
                debug!(
                    "Iteration {iteration}: new global best {} from particle {}",
                    tracker.global_best_fitness(),
                    tracker.current_best_index()
                );
            }

            history.record(tracker.global_best(), tracker.global_best_fitness());

            if let Some(observer) = observer.as_deref_mut() {
                let best_position = tracker.global_best().to_vec();
                observer.observe_iter(iteration, &best_position, tracker.global_best_fitness());
                observer.observe_swarm(
                    iteration,
                    &SwarmView {
                        positions: swarm.positions(),
                        velocities: swarm.velocities(),
                        weights: inertia.weights(),
                        personal_best: tracker.personal_best(),
                        personal_best_fitness: tracker.personal_best_fitness(),
                        fitness: &fitness,
                        current_best_index: tracker.current_best_index(),
                    },
                );
            }
        }

        info!(
            "SRPSO finished with best fitness {} ({non_finite} non-finite evaluations)",
            tracker.global_best_fitness()
        );

        Ok(OptimizationReport {
            best_position: tracker.global_best().to_vec(),
            best_params: problem.full_params(tracker.global_best()),
            best_fitness: tracker.global_best_fitness(),
            history,
            iterations: max_iters,
            evaluations: swarm_size * (max_iters + 1),
            non_finite_evaluations: non_finite,
            seed,
        })
    }
}
