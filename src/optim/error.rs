use std::fmt::{self, Display};

use thiserror::Error;

use crate::objective::error::ObjectiveError;

/// Point of the run at which the objective was being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Scoring of the initial swarm
    Initialization,
    /// Scoring after the position update of the given iteration
    Iteration(usize),
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Initialization => write!(f, "initialization"),
            Stage::Iteration(iteration) => write!(f, "iteration {iteration}"),
        }
    }
}

/// Errors raised while configuring or running the optimizer.
///
/// Every variant except [`OptimizeError::Objective`] is a configuration error
/// and is raised before the first objective evaluation.
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("No optimizable variables: every variable is fixed")]
    NoOptimizableVariables,
    #[error("Swarm size must be at least 2, found {0}")]
    SwarmTooSmall(usize),
    #[error("Maximum number of iterations must be at least 1")]
    ZeroIterations,
    #[error("Vary fraction must lie in [0, 1], found {0}")]
    InvalidVaryFraction(f64),
    #[error("Inertia weights must be finite, found start={start} end={end}")]
    NonFiniteInertia { start: f64, end: f64 },
    #[error("Unknown variable kind code {0}. Expected 0 (real), 1 (integer) or 2 (fixed)")]
    UnknownKindCode(f64),
    #[error("Row {row} of the variable table has {columns} columns, expected 3")]
    MalformedRow { row: usize, columns: usize },
    #[error("Variable {index} has inverted bounds: lower={lower} > upper={upper}")]
    InvertedBounds { index: usize, lower: f64, upper: f64 },
    #[error("Variable {index} has non-finite bounds: lower={lower} upper={upper}")]
    NonFiniteBounds { index: usize, lower: f64, upper: f64 },
    #[error("Integer variable {index} has non-integral bounds: lower={lower} upper={upper}")]
    NonIntegralBounds { index: usize, lower: f64, upper: f64 },
    #[error("Integer variable {index} has an empty sampling range [{lower}, {upper})")]
    EmptyIntegerRange { index: usize, lower: f64, upper: f64 },
    #[error("Integer variable {index} has bounds beyond ±2^53: lower={lower} upper={upper}")]
    IntegerBoundsTooLarge { index: usize, lower: f64, upper: f64 },
    #[error("Fixed variable {index} has non-finite value {value}")]
    NonFiniteFixedValue { index: usize, value: f64 },
    #[error("Warm start has wrong length: expected {expected}, found {found}")]
    WarmStartLength { expected: usize, found: usize },
    #[error("Warm start value {value} of dimension {dim} lies outside [{lower}, {upper}]")]
    WarmStartOutOfBounds {
        dim: usize,
        value: f64,
        lower: f64,
        upper: f64,
    },
    #[error("Warm start value {value} of integer dimension {dim} is not integral")]
    WarmStartNotIntegral { dim: usize, value: f64 },
    #[error("Objective failed for particle {particle} during {stage}")]
    Objective {
        stage: Stage,
        particle: usize,
        #[source]
        source: ObjectiveError,
    },
}

impl OptimizeError {
    /// Whether the error was raised by configuration validation, before the run started.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, OptimizeError::Objective { .. })
    }
}
