//! Personal-best and global-best bookkeeping.

use ndarray::{Array1, Array2, ArrayView1};

/// Maps non-finite fitness values to negative infinity.
///
/// NaN and infinite objective values can never become an incumbent.
pub fn sanitize_fitness(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::NEG_INFINITY
    }
}

/// Index of the largest value. The first occurrence wins ties.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn argmax(values: &Array1<f64>) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = i;
        }
    }
    best
}

/// Tracks the best positions found by each particle and by the swarm.
#[derive(Debug, Clone)]
pub struct BestTracker {
    personal_best: Array2<f64>,
    personal_best_fitness: Array1<f64>,
    global_best: Array1<f64>,
    global_best_fitness: f64,
    /// Leader of the most recent evaluation, not necessarily the all-time best
    current_best_index: usize,
}

impl BestTracker {
    /// Initializes all records from the first evaluation of the swarm.
    ///
    /// # Arguments
    ///
    /// * `positions` - Initial positions, one row per particle
    /// * `fitness` - Sanitized fitness of each particle
    pub fn new(positions: &Array2<f64>, fitness: &Array1<f64>) -> Self {
        let leader = argmax(fitness);
        Self {
            personal_best: positions.clone(),
            personal_best_fitness: fitness.clone(),
            global_best: positions.row(leader).to_owned(),
            global_best_fitness: fitness[leader],
            current_best_index: leader,
        }
    }

    /// Folds a new evaluation of the swarm into the records.
    ///
    /// Personal and global bests change only on strict improvement. The current
    /// best index is always moved to this evaluation's arg-max.
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if a new global best was found
    pub fn update(&mut self, positions: &Array2<f64>, fitness: &Array1<f64>) -> bool {
        for (i, &value) in fitness.iter().enumerate() {
            if value > self.personal_best_fitness[i] {
                self.personal_best_fitness[i] = value;
                self.personal_best.row_mut(i).assign(&positions.row(i));
            }
        }

        let leader = argmax(fitness);
        self.current_best_index = leader;

        if fitness[leader] > self.global_best_fitness {
            self.global_best_fitness = fitness[leader];
            self.global_best.assign(&positions.row(leader));
            return true;
        }
        false
    }

    pub fn personal_best(&self) -> &Array2<f64> {
        &self.personal_best
    }

    pub fn personal_best_fitness(&self) -> &Array1<f64> {
        &self.personal_best_fitness
    }

    pub fn global_best(&self) -> ArrayView1<'_, f64> {
        self.global_best.view()
    }

    pub fn global_best_fitness(&self) -> f64 {
        self.global_best_fitness
    }

    pub fn current_best_index(&self) -> usize {
        self.current_best_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_argmax_first_occurrence() {
        assert_eq!(argmax(&array![1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(argmax(&array![5.0, 5.0]), 0);
        assert_eq!(argmax(&array![f64::NEG_INFINITY, f64::NEG_INFINITY]), 0);
        assert_eq!(argmax(&array![f64::NEG_INFINITY, -1e300]), 1);
    }

    #[test]
    fn test_sanitize_fitness() {
        assert_eq!(sanitize_fitness(2.5), 2.5);
        assert_eq!(sanitize_fitness(f64::NAN), f64::NEG_INFINITY);
        assert_eq!(sanitize_fitness(f64::INFINITY), f64::NEG_INFINITY);
        assert_eq!(sanitize_fitness(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn test_initial_records() {
        let positions = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let tracker = BestTracker::new(&positions, &array![1.0, 4.0, 4.0]);

        assert_eq!(tracker.current_best_index(), 1);
        assert_eq!(tracker.global_best(), array![1.0, 1.0]);
        assert_eq!(tracker.global_best_fitness(), 4.0);
        assert_eq!(tracker.personal_best(), &positions);
    }

    #[test]
    fn test_strict_improvement_only() {
        let positions = array![[0.0], [1.0]];
        let mut tracker = BestTracker::new(&positions, &array![1.0, 2.0]);

        // Ties keep the incumbent, the leader index still moves
        let moved = array![[5.0], [6.0]];
        let improved = tracker.update(&moved, &array![2.0, 1.0]);

        assert!(!improved);
        assert_eq!(tracker.current_best_index(), 0);
        assert_eq!(tracker.global_best(), array![1.0]);
        assert_eq!(tracker.personal_best(), &array![[5.0], [1.0]]);
        assert_eq!(tracker.personal_best_fitness(), &array![2.0, 2.0]);

        let improved = tracker.update(&array![[7.0], [8.0]], &array![0.0, 3.0]);
        assert!(improved);
        assert_eq!(tracker.global_best(), array![8.0]);
        assert_eq!(tracker.global_best_fitness(), 3.0);
    }

    #[test]
    fn test_non_finite_never_becomes_incumbent() {
        let positions = array![[0.0], [1.0]];
        let mut tracker = BestTracker::new(&positions, &array![1.0, 0.5]);

        let fitness = array![sanitize_fitness(f64::NAN), sanitize_fitness(f64::INFINITY)];
        let improved = tracker.update(&array![[9.0], [9.0]], &fitness);

        assert!(!improved);
        assert_eq!(tracker.global_best_fitness(), 1.0);
        assert_eq!(tracker.personal_best(), &positions);
    }
}
