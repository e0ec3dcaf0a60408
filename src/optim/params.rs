//! Swarm parameters controlling size, run length and the inertia schedule.
//!
//! [`PsoParams`] can be built programmatically via [`PsoParamsBuilder`],
//! deserialized from a run configuration, or converted from the compact
//! five-element form `[swarm_size, max_iters, w_start, w_end, vary_fraction]`.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::error::OptimizeError;

/// Parameters of a swarm run.
///
/// # Fields
///
/// * `swarm_size` - Number of particles (default: 20)
/// * `max_iters` - Number of update iterations (default: 100)
/// * `w_start` - Initial inertia weight of every particle (default: 1.05)
/// * `w_end` - Inertia weight reached by a particle that never leads (default: 0.5)
/// * `vary_fraction` - Fraction of `max_iters` during which weights adapt (default: 0.9)
///
/// # Examples
///
/// ```
/// use srpso::optim::PsoParamsBuilder;
///
/// let params = PsoParamsBuilder::default()
///     .swarm_size(30)
///     .max_iters(200)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.vary_for(), 180);
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct PsoParams {
    #[builder(default = "20")]
    pub swarm_size: usize,
    #[builder(default = "100")]
    pub max_iters: usize,
    #[builder(default = "1.05")]
    pub w_start: f64,
    #[builder(default = "0.5")]
    pub w_end: f64,
    #[builder(default = "0.9")]
    pub vary_fraction: f64,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            swarm_size: 20,
            max_iters: 100,
            w_start: 1.05,
            w_end: 0.5,
            vary_fraction: 0.9,
        }
    }
}

impl PsoParams {
    /// Checks that the parameters describe a runnable swarm.
    ///
    /// # Errors
    ///
    /// * `OptimizeError::SwarmTooSmall` if fewer than two particles are requested
    /// * `OptimizeError::ZeroIterations` if `max_iters` is zero
    /// * `OptimizeError::NonFiniteInertia` if either weight bound is NaN or infinite
    /// * `OptimizeError::InvalidVaryFraction` if the fraction is outside `[0, 1]`
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.swarm_size < 2 {
            return Err(OptimizeError::SwarmTooSmall(self.swarm_size));
        }
        if self.max_iters == 0 {
            return Err(OptimizeError::ZeroIterations);
        }
        if !self.w_start.is_finite() || !self.w_end.is_finite() {
            return Err(OptimizeError::NonFiniteInertia {
                start: self.w_start,
                end: self.w_end,
            });
        }
        if !(0.0..=1.0).contains(&self.vary_fraction) {
            return Err(OptimizeError::InvalidVaryFraction(self.vary_fraction));
        }
        Ok(())
    }

    /// Last iteration (inclusive) in which inertia weights still adapt.
    pub fn vary_for(&self) -> usize {
        (self.vary_fraction * self.max_iters as f64).floor() as usize
    }

    /// Amount added to the leader's weights and subtracted from everyone else's.
    ///
    /// A zero-length vary window yields a rate of zero, so weights stay at `w_start`.
    pub fn decay_rate(&self) -> f64 {
        match self.vary_for() {
            0 => 0.0,
            vary_for => (self.w_start - self.w_end) / vary_for as f64,
        }
    }
}

impl TryFrom<&[f64]> for PsoParams {
    type Error = OptimizeError;

    /// Reads `[swarm_size, max_iters, w_start, w_end, vary_fraction]`.
    ///
    /// Counts are truncated towards zero. The result is validated.
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let [swarm_size, max_iters, w_start, w_end, vary_fraction] = values else {
            return Err(OptimizeError::MalformedRow {
                row: 0,
                columns: values.len(),
            });
        };

        let params = Self {
            swarm_size: swarm_size.max(0.0) as usize,
            max_iters: max_iters.max(0.0) as usize,
            w_start: *w_start,
            w_end: *w_end,
            vary_fraction: *vary_fraction,
        };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_defaults() {
        let params = PsoParamsBuilder::default().build().unwrap();
        assert_eq!(params, PsoParams::default());
    }

    #[test]
    fn test_decay_rate() {
        let params = PsoParamsBuilder::default()
            .max_iters(10)
            .w_start(1.0)
            .w_end(0.5)
            .vary_fraction(0.5)
            .build()
            .unwrap();

        assert_eq!(params.vary_for(), 5);
        assert_relative_eq!(params.decay_rate(), 0.1);
    }

    #[test]
    fn test_zero_vary_window_has_zero_decay() {
        let params = PsoParamsBuilder::default()
            .max_iters(10)
            .vary_fraction(0.0)
            .build()
            .unwrap();

        assert_eq!(params.vary_for(), 0);
        assert_eq!(params.decay_rate(), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let small = PsoParamsBuilder::default().swarm_size(1).build().unwrap();
        assert!(matches!(
            small.validate(),
            Err(OptimizeError::SwarmTooSmall(1))
        ));

        let no_iters = PsoParamsBuilder::default().max_iters(0).build().unwrap();
        assert!(matches!(
            no_iters.validate(),
            Err(OptimizeError::ZeroIterations)
        ));

        let fraction = PsoParamsBuilder::default()
            .vary_fraction(1.5)
            .build()
            .unwrap();
        assert!(matches!(
            fraction.validate(),
            Err(OptimizeError::InvalidVaryFraction(_))
        ));

        let weights = PsoParamsBuilder::default()
            .w_start(f64::NAN)
            .build()
            .unwrap();
        assert!(matches!(
            weights.validate(),
            Err(OptimizeError::NonFiniteInertia { .. })
        ));
    }

    #[test]
    fn test_try_from_slice() {
        let params = PsoParams::try_from(&[10.0, 50.0, 1.2, 0.4, 0.8][..]).unwrap();
        assert_eq!(params.swarm_size, 10);
        assert_eq!(params.max_iters, 50);
        assert_eq!(params.vary_for(), 40);

        let short = PsoParams::try_from(&[10.0, 50.0][..]);
        assert!(matches!(
            short,
            Err(OptimizeError::MalformedRow { columns: 2, .. })
        ));
    }
}
