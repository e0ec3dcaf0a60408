use thiserror::Error;

/// Errors an objective function may report while scoring a parameter vector.
///
/// The optimizer never inspects these beyond propagating them: any error aborts
/// the run and is returned to the caller wrapped in
/// [`OptimizeError::Objective`](crate::optim::OptimizeError::Objective).
#[derive(Debug, Error)]
pub enum ObjectiveError {
    /// The objective rejected the parameter vector or failed internally
    #[error("Objective evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The parameter vector does not have the length the objective expects
    #[error("Objective expected {expected} parameters, found {found}")]
    ParameterLength { expected: usize, found: usize },

    /// Any other error raised by user code
    #[error(transparent)]
    External(#[from] Box<dyn std::error::Error + Send + Sync>),
}
