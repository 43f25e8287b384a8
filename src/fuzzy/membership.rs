//! Triangular and trapezoidal membership functions.

use serde::{Deserialize, Serialize};

use super::universe::Universe;
use crate::error::ConfigError;

/// A piecewise-linear shape `a <= b <= c <= d`.
///
/// Zero outside `[a, d]`, one on the plateau `[b, c]`, linear on the
/// shoulders.  A triangle is the case `b == c`.  Degenerate shoulders
/// (`a == b` or `c == d`) give a vertical edge, which is how the extreme
/// terms of a variable saturate at the universe boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MembershipFunction {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl MembershipFunction {
    /// Triangle rising from `a`, peaking at `b`, falling to zero at `c`.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        Self::trapezoidal(a, b, b, c).map_err(|_| ConfigError::MalformedBreakpoints {
            points: vec![a, b, c],
        })
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ConfigError> {
        let points = [a, b, c, d];
        let ordered = points.windows(2).all(|w| w[0] <= w[1]);
        if !ordered || points.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::MalformedBreakpoints {
                points: points.to_vec(),
            });
        }
        Ok(Self { a, b, c, d })
    }

    pub fn breakpoints(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Degree of membership of `x`, always in `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() || x < self.a || x > self.d {
            0.
        } else if x < self.b {
            (x - self.a) / (self.b - self.a)
        } else if x <= self.c {
            1.
        } else {
            (self.d - x) / (self.d - self.c)
        }
    }

    /// Whether every breakpoint lies inside `universe`.
    pub fn fits(&self, universe: &Universe) -> bool {
        universe.contains(self.a) && universe.contains(self.d)
    }
}
