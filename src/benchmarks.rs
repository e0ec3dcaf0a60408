//! Ready-made objective functions.
//!
//! These objectives ignore the data partitions and only score the parameter
//! vector. They are negated versions of classic minimization benchmarks, so
//! their maximum is zero. Used by the command-line interface, the benches and
//! the tests.

use std::f64::consts::PI;

use crate::objective::error::ObjectiveError;

/// Negated squared distance to `target`, maximal (zero) at `params == target`.
///
/// # Errors
///
/// The objective returns `ObjectiveError::ParameterLength` if the parameter
/// vector and the target differ in length.
pub fn sphere<D, L>(
    target: Vec<f64>,
) -> impl Fn(&D, &L, &D, &L, &[f64]) -> Result<f64, ObjectiveError> + Clone + Send + Sync {
    move |_, _, _, _, params| {
        check_length(target.len(), params)?;
        Ok(-params
            .iter()
            .zip(target.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>())
    }
}

/// Negated Rastrigin function, maximal (zero) at the origin.
pub fn rastrigin<D, L>(
) -> impl Fn(&D, &L, &D, &L, &[f64]) -> Result<f64, ObjectiveError> + Clone + Send + Sync {
    |_, _, _, _, params| {
        let n = params.len() as f64;
        Ok(-(10.0 * n
            + params
                .iter()
                .map(|x| x * x - 10.0 * (2.0 * PI * x).cos())
                .sum::<f64>()))
    }
}

/// Same value for every parameter vector.
pub fn constant<D, L>(
    value: f64,
) -> impl Fn(&D, &L, &D, &L, &[f64]) -> Result<f64, ObjectiveError> + Clone + Send + Sync {
    move |_, _, _, _, _| Ok(value)
}

fn check_length(expected: usize, params: &[f64]) -> Result<(), ObjectiveError> {
    if params.len() != expected {
        return Err(ObjectiveError::ParameterLength {
            expected,
            found: params.len(),
        });
    }
    Ok(())
}
