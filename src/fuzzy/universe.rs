//! Bounded, finite-resolution numeric domains.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::linspace::Linspace;
use crate::error::ConfigError;

/// Upper bound on [`Universe::len`].
pub const MAX_SAMPLES: usize = 100_001;

/// An ordered numeric range `[min, max]` with a sampling step.
///
/// Membership functions are evaluated continuously over it; the step only
/// matters where the universe is discretized (coverage checks and
/// defuzzification).  The step must divide the range into a whole number
/// of intervals, so the samples land exactly `step` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
}

impl Universe {
    pub fn new(range: RangeInclusive<f64>, step: f64) -> Result<Self, ConfigError> {
        let (min, max) = (*range.start(), *range.end());
        let valid = min.is_finite() && max.is_finite() && step.is_finite() && min < max && step > 0.;
        if !valid {
            return Err(ConfigError::InvalidUniverse { min, max, step });
        }
        let intervals = (max - min) / step;
        let whole = intervals.round();
        // tolerate the representation error of steps like 0.01
        let divides = (intervals - whole).abs() <= 1e-6 * whole.max(1.);
        if !divides || whole + 1. > MAX_SAMPLES as f64 {
            return Err(ConfigError::InvalidUniverse { min, max, step });
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Defuzzification fallback when no rule fired.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Clamp `x` to the nearest boundary.  NaN passes through unchanged.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Number of samples produced by [`samples`](Self::samples).
    pub fn len(&self) -> usize {
        // round, not floor: (3.0 - 0.0) / 0.01 lands a hair below 300
        ((self.max - self.min) / self.step).round() as usize + 1
    }

    /// Always false; a valid universe has at least two samples.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The discretized universe, both endpoints included.
    pub fn samples(&self) -> Linspace {
        Linspace::new(self.min, self.max, self.len().max(2))
    }
}
