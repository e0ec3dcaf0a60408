//! Outcome of a run.
//!
//! Fitness values in a report may be `-inf` when every evaluation of the run
//! was non-finite. JSON has no representation for infinities, so `serde_json`
//! writes such values as `null`. Check `non_finite_evaluations` to tell the
//! two apart from a missing field.

use serde::Serialize;

use super::history::History;

/// Result of a completed run.
///
/// The report holds the global best found during the run, the full
/// convergence trace and a few counters describing the work done. It can be
/// serialized to JSON and printed as a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    /// Global best position over the optimizable dimensions
    pub best_position: Vec<f64>,
    /// Full parameter vector of the global best, fixed constants first
    pub best_params: Vec<f64>,
    /// Fitness of the global best, `-inf` if no evaluation was finite (`null` in JSON)
    pub best_fitness: f64,
    /// One row per iteration
    pub history: History,
    /// Number of update iterations performed
    pub iterations: usize,
    /// Number of objective evaluations, including the initial swarm
    pub evaluations: usize,
    /// Number of evaluations that returned NaN or an infinite value
    pub non_finite_evaluations: usize,
    /// Seed the random streams were derived from
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn report(best_fitness: f64) -> OptimizationReport {
        let mut history = History::with_capacity(1);
        history.record(array![0.5].view(), best_fitness);
        OptimizationReport {
            best_position: vec![0.5],
            best_params: vec![1.0, 0.5],
            best_fitness,
            history,
            iterations: 1,
            evaluations: 4,
            non_finite_evaluations: 4,
            seed: 7,
        }
    }

    #[test]
    fn test_infinite_fitness_serializes_as_null() {
        let json = serde_json::to_value(report(f64::NEG_INFINITY)).unwrap();

        assert!(json["best_fitness"].is_null());
        assert!(json["history"]["rows"][0]["fitness"].is_null());
        assert_eq!(json["non_finite_evaluations"], 4);
    }

    #[test]
    fn test_finite_fitness_serializes_as_number() {
        let json = serde_json::to_value(report(-0.25)).unwrap();

        assert_eq!(json["best_fitness"], -0.25);
        assert_eq!(json["seed"], 7);
    }
}
