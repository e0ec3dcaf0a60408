//! Variable table and its decoding into the optimizer's search space.
//!
//! A variable table lists every parameter the objective receives. Fixed
//! variables are held at a constant value, real and integer variables are
//! searched within their bounds. [`DecodedVariables`] splits the table into the
//! optimizable dimensions (table order preserved), the fixed constants and
//! the integer mask used by the position update.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::OptimizeError;

/// Fraction of a dimension's range a particle may travel in one step.
pub const VELOCITY_CAP_FRACTION: f64 = 0.100625;

/// Largest magnitude of an integer bound, 2^53. Every integer up to it is exact in `f64` and `i64`.
pub const MAX_INTEGER_BOUND: f64 = 9_007_199_254_740_992.0;

/// How a variable participates in the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Continuous value in `[lower, upper]`
    Real,
    /// Integral value in `[lower, upper]`
    Integer,
    /// Constant held at `lower`, excluded from the search
    Fixed,
}

impl VariableKind {
    /// Numeric code used by tabular variable specifications.
    pub fn code(&self) -> u8 {
        match self {
            VariableKind::Real => 0,
            VariableKind::Integer => 1,
            VariableKind::Fixed => 2,
        }
    }
}

impl TryFrom<f64> for VariableKind {
    type Error = OptimizeError;

    /// Converts a kind code (0=real, 1=integer, 2=fixed).
    fn try_from(code: f64) -> Result<Self, Self::Error> {
        match code {
            c if c == 0.0 => Ok(VariableKind::Real),
            c if c == 1.0 => Ok(VariableKind::Integer),
            c if c == 2.0 => Ok(VariableKind::Fixed),
            c => Err(OptimizeError::UnknownKindCode(c)),
        }
    }
}

/// Specification of a single parameter.
///
/// For fixed variables the constant value is stored in `lower` and `upper` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Participation in the search
    pub kind: VariableKind,
    /// Lower bound, or the constant of a fixed variable
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl VariableSpec {
    /// Creates a continuous variable bounded by `[lower, upper]`.
    pub fn real(lower: f64, upper: f64) -> Self {
        Self {
            kind: VariableKind::Real,
            lower,
            upper,
        }
    }

    /// Creates an integer variable bounded by `[lower, upper]`.
    ///
    /// Initial positions are drawn from `[lower, upper)`, so `upper` is only
    /// reachable through the position update.
    pub fn integer(lower: f64, upper: f64) -> Self {
        Self {
            kind: VariableKind::Integer,
            lower,
            upper,
        }
    }

    /// Creates a variable held constant at `value`.
    pub fn fixed(value: f64) -> Self {
        Self {
            kind: VariableKind::Fixed,
            lower: value,
            upper: value,
        }
    }

    /// Parses a `[kind_code, lower, upper]` row.
    ///
    /// # Arguments
    ///
    /// * `row` - Index of the row, used in error messages
    /// * `values` - The row values
    pub fn from_row(row: usize, values: &[f64]) -> Result<Self, OptimizeError> {
        let [code, lower, upper] = values else {
            return Err(OptimizeError::MalformedRow {
                row,
                columns: values.len(),
            });
        };

        Ok(Self {
            kind: VariableKind::try_from(*code)?,
            lower: *lower,
            upper: *upper,
        })
    }

    /// Whether the variable is searched by the swarm.
    pub fn is_optimizable(&self) -> bool {
        self.kind != VariableKind::Fixed
    }

    /// Checks the variable in isolation.
    fn validate(&self, index: usize) -> Result<(), OptimizeError> {
        let (lower, upper) = (self.lower, self.upper);

        if self.kind == VariableKind::Fixed {
            if !lower.is_finite() {
                return Err(OptimizeError::NonFiniteFixedValue {
                    index,
                    value: lower,
                });
            }
            return Ok(());
        }

        if !lower.is_finite() || !upper.is_finite() {
            return Err(OptimizeError::NonFiniteBounds {
                index,
                lower,
                upper,
            });
        }
        if lower > upper {
            return Err(OptimizeError::InvertedBounds {
                index,
                lower,
                upper,
            });
        }

        if self.kind == VariableKind::Integer {
            if lower.fract() != 0.0 || upper.fract() != 0.0 {
                return Err(OptimizeError::NonIntegralBounds {
                    index,
                    lower,
                    upper,
                });
            }
            if lower.abs() > MAX_INTEGER_BOUND || upper.abs() > MAX_INTEGER_BOUND {
                return Err(OptimizeError::IntegerBoundsTooLarge {
                    index,
                    lower,
                    upper,
                });
            }
            if lower == upper {
                return Err(OptimizeError::EmptyIntegerRange {
                    index,
                    lower,
                    upper,
                });
            }
        }

        Ok(())
    }
}

/// Reads a variable table stored as rows of `[kind_code, lower, upper]`.
///
/// # Arguments
///
/// * `rows` - Matrix with one row per variable and three columns
///
/// # Returns
///
/// * `Result<Vec<VariableSpec>, OptimizeError>` - The parsed table in row order
pub fn variables_from_rows(rows: &Array2<f64>) -> Result<Vec<VariableSpec>, OptimizeError> {
    rows.rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| VariableSpec::from_row(i, &row.to_vec()))
        .collect()
}

/// The search space derived from a variable table.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedVariables {
    /// Optimizable variables in table order
    specs: Vec<VariableSpec>,
    /// Values of the fixed variables in table order
    constants: Array1<f64>,
    /// `true` for every optimizable dimension of integer kind
    integer_mask: Vec<bool>,
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl DecodedVariables {
    /// Splits a variable table into fixed and optimizable dimensions.
    ///
    /// # Arguments
    ///
    /// * `table` - One specification per parameter, in the order the objective expects
    ///
    /// # Returns
    ///
    /// * `Result<DecodedVariables, OptimizeError>` - The decoded search space
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is malformed or if every
    /// variable is fixed.
    pub fn decode(table: &[VariableSpec]) -> Result<Self, OptimizeError> {
        for (index, spec) in table.iter().enumerate() {
            spec.validate(index)?;
        }

        let specs: Vec<VariableSpec> = table
            .iter()
            .filter(|spec| spec.is_optimizable())
            .copied()
            .collect();

        if specs.is_empty() {
            return Err(OptimizeError::NoOptimizableVariables);
        }

        let constants = table
            .iter()
            .filter(|spec| !spec.is_optimizable())
            .map(|spec| spec.lower)
            .collect::<Array1<f64>>();

        Ok(Self {
            integer_mask: specs
                .iter()
                .map(|spec| spec.kind == VariableKind::Integer)
                .collect(),
            lower: specs.iter().map(|spec| spec.lower).collect(),
            upper: specs.iter().map(|spec| spec.upper).collect(),
            constants,
            specs,
        })
    }

    /// Number of optimizable dimensions.
    pub fn dim(&self) -> usize {
        self.specs.len()
    }

    /// Length of the full parameter vector passed to the objective.
    pub fn full_len(&self) -> usize {
        self.constants.len() + self.specs.len()
    }

    pub fn specs(&self) -> &[VariableSpec] {
        &self.specs
    }

    pub fn constants(&self) -> &Array1<f64> {
        &self.constants
    }

    pub fn integer_mask(&self) -> &[bool] {
        &self.integer_mask
    }

    pub fn is_integer(&self, dim: usize) -> bool {
        self.integer_mask[dim]
    }

    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Per-dimension velocity cap, `VELOCITY_CAP_FRACTION * (upper - lower)`.
    pub fn max_velocity(&self) -> Array1<f64> {
        (&self.upper - &self.lower) * VELOCITY_CAP_FRACTION
    }

    /// Checks a warm-start vector against the search space.
    ///
    /// # Errors
    ///
    /// * `OptimizeError::WarmStartLength` if the length differs from [`Self::dim`]
    /// * `OptimizeError::WarmStartOutOfBounds` if a value lies outside its bounds
    /// * `OptimizeError::WarmStartNotIntegral` if an integer dimension holds a fraction
    pub fn validate_warm_start(&self, warm_start: &[f64]) -> Result<(), OptimizeError> {
        if warm_start.len() != self.dim() {
            return Err(OptimizeError::WarmStartLength {
                expected: self.dim(),
                found: warm_start.len(),
            });
        }

        for (dim, &value) in warm_start.iter().enumerate() {
            let (lower, upper) = (self.lower[dim], self.upper[dim]);
            // Written so that NaN fails the check
            if !(value >= lower && value <= upper) {
                return Err(OptimizeError::WarmStartOutOfBounds {
                    dim,
                    value,
                    lower,
                    upper,
                });
            }
            if self.integer_mask[dim] && value.fract() != 0.0 {
                return Err(OptimizeError::WarmStartNotIntegral { dim, value });
            }
        }

        Ok(())
    }
}

impl TryFrom<&[VariableSpec]> for DecodedVariables {
    type Error = OptimizeError;

    fn try_from(table: &[VariableSpec]) -> Result<Self, Self::Error> {
        Self::decode(table)
    }
}
