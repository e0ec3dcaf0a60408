//! Progress observers.
//!
//! An observer is notified once after the initial evaluation and once at the
//! end of every iteration. Observers only read state; they cannot influence
//! the run.

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use ndarray::{Array1, Array2};

use super::swarm::Particle;

/// Read-only view on the swarm at the end of an iteration.
pub struct SwarmView<'a> {
    pub positions: &'a Array2<f64>,
    pub velocities: &'a Array2<f64>,
    pub weights: &'a Array2<f64>,
    pub personal_best: &'a Array2<f64>,
    pub personal_best_fitness: &'a Array1<f64>,
    /// Fitness of the evaluation that just finished
    pub fitness: &'a Array1<f64>,
    pub current_best_index: usize,
}

impl SwarmView<'_> {
    /// Snapshot of particle `i`.
    pub fn particle(&self, i: usize) -> Particle {
        Particle {
            position: self.positions.row(i).to_vec(),
            velocity: self.velocities.row(i).to_vec(),
            personal_best: self.personal_best.row(i).to_vec(),
            personal_best_fitness: self.personal_best_fitness[i],
        }
    }

    /// Snapshots of all particles in swarm order.
    pub fn particles(&self) -> Vec<Particle> {
        (0..self.positions.nrows()).map(|i| self.particle(i)).collect()
    }
}

/// Receives progress notifications from a run.
pub trait Observe {
    /// Called once after the initial swarm has been evaluated.
    fn observe_init(&mut self, _best_position: &[f64], _best_fitness: f64) {}

    /// Called at the end of every iteration with the global best known so far.
    ///
    /// # Arguments
    /// * `iteration` - Zero-based iteration index
    /// * `best_position` - Global best position over the optimizable dimensions
    /// * `best_fitness` - Global best fitness
    fn observe_iter(&mut self, iteration: usize, best_position: &[f64], best_fitness: f64);

    /// Called at the end of every iteration, after [`Observe::observe_iter`], with the full swarm.
    fn observe_swarm(&mut self, _iteration: usize, _swarm: &SwarmView<'_>) {}
}

/// Forwards every iteration to a closure.
pub struct CallbackObserver {
    /// Called with `(iteration, best_position, best_fitness)`
    pub callback: Box<dyn FnMut(usize, &[f64], f64) + Send>,
}

impl CallbackObserver {
    pub fn new(callback: impl FnMut(usize, &[f64], f64) + Send + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Observe for CallbackObserver {
    fn observe_iter(&mut self, iteration: usize, best_position: &[f64], best_fitness: f64) {
        (self.callback)(iteration, best_position, best_fitness)
    }
}

/// Reports every iteration through the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observe for LogObserver {
    fn observe_init(&mut self, best_position: &[f64], best_fitness: f64) {
        info!("Initial swarm best fitness {best_fitness}, params {best_position:?}");
    }

    fn observe_iter(&mut self, iteration: usize, best_position: &[f64], best_fitness: f64) {
        info!("Iteration {iteration}: best fitness {best_fitness}, params {best_position:?}");
    }
}

/// Shows a terminal progress bar with the current best fitness.
pub struct ProgressObserver {
    bar: ProgressBar,
    max_iters: usize,
}

impl ProgressObserver {
    /// Creates a progress bar spanning `max_iters` iterations.
    pub fn new(max_iters: usize) -> Self {
        let bar = ProgressBar::new(max_iters as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} | {elapsed}/{eta} | {msg}")
        {
            bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
        }
        bar.set_message("Initializing...");
        Self { bar, max_iters }
    }
}

impl Observe for ProgressObserver {
    fn observe_init(&mut self, _best_position: &[f64], best_fitness: f64) {
        self.bar.set_message(format!("best fitness {best_fitness:.6}"));
    }

    fn observe_iter(&mut self, iteration: usize, _best_position: &[f64], best_fitness: f64) {
        self.bar.inc(1);
        self.bar.set_message(format!("best fitness {best_fitness:.6}"));
        if iteration + 1 >= self.max_iters {
            self.bar.finish();
        }
    }
}

/// Fans notifications out to several observers, in order.
impl Observe for Vec<Box<dyn Observe + Send>> {
    fn observe_init(&mut self, best_position: &[f64], best_fitness: f64) {
        for observer in self.iter_mut() {
            observer.observe_init(best_position, best_fitness);
        }
    }

    fn observe_iter(&mut self, iteration: usize, best_position: &[f64], best_fitness: f64) {
        for observer in self.iter_mut() {
            observer.observe_iter(iteration, best_position, best_fitness);
        }
    }

    fn observe_swarm(&mut self, iteration: usize, swarm: &SwarmView<'_>) {
        for observer in self.iter_mut() {
            observer.observe_swarm(iteration, swarm);
        }
    }
}
