//! Outbound commands to the fan.
//!
//! A [`FanCommand`] is the final output of one control cycle: the crisp
//! centroid from the engine mapped onto the device's discrete level set.

use crate::control::FanLevel;
use crate::fuzzy::Crisp;

/// One fan command together with the crisp value it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanCommand {
    pub level: FanLevel,
    /// Defuzzified fan speed before rounding.
    pub centroid: f64,
    /// No rule fired and `centroid` is the fan-speed midpoint.
    pub fallback: bool,
}

impl FanCommand {
    /// Round to the nearest level (ties to even) and clamp to
    /// `[Off, High]`.  NaN maps to [`FanLevel::Off`].
    pub fn quantize(centroid: f64) -> FanLevel {
        let max = f64::from(FanLevel::MAX.as_u8());
        let index = centroid.round_ties_even().clamp(0., max) as u8;
        FanLevel::from_index(index).unwrap_or(FanLevel::MAX)
    }

    pub fn from_crisp(crisp: Crisp) -> Self {
        Self {
            level: Self::quantize(crisp.value),
            centroid: crisp.value,
            fallback: crisp.fallback,
        }
    }
}
