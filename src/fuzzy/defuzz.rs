//! Reduction of an aggregated membership function to one crisp value.

use serde::{Deserialize, Serialize};

use super::engine::AggregatedMembership;
use super::universe::Universe;

/// Method for defuzzificating the aggregated membership function.
///
/// Every method discretizes `universe` at its step and walks the samples
/// without buffering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defuzzifier {
    /// Center of area: `Σ y·μ(y) / Σ μ(y)`
    #[default]
    Centroid,
    /// Value splitting the area into two equal halves
    Bisector,
    /// Mean of the values where the membership is maximum
    MeanOfMaximum,
    /// Smallest value where the membership is maximum
    SmallestOfMaximum,
    /// Largest value where the membership is maximum
    LargestOfMaximum,
}

impl Defuzzifier {
    /// Crisp value of `aggregated`, or `None` when its sampled area is zero.
    ///
    /// A rule can fire on a term narrower than the step, so the area is
    /// measured on the samples, not on the rule strengths.  The caller
    /// substitutes [`Universe::midpoint`] for `None`.
    pub fn reduce(self, aggregated: &AggregatedMembership, universe: &Universe) -> Option<f64> {
        let samples = || aggregated.sample(universe);
        let (total, moment) = samples()
            .fold((0., 0.), |(total, moment), (y, m)| (total + m, moment + y * m));
        if total <= 0. {
            return None;
        }

        let value = match self {
            Self::Centroid => moment / total,
            Self::Bisector => {
                let half = total / 2.;
                let mut cumulative = 0.;
                samples()
                    .find(|(_, m)| {
                        cumulative += m;
                        cumulative >= half
                    })
                    .map_or(universe.max(), |(y, _)| y)
            }
            Self::MeanOfMaximum | Self::SmallestOfMaximum | Self::LargestOfMaximum => {
                let peak = samples().map(|(_, m)| m).fold(0., f64::max);
                let at_peak = samples().filter(|(_, m)| *m == peak).map(|(y, _)| y);
                match self {
                    Self::SmallestOfMaximum => at_peak.fold(f64::INFINITY, f64::min),
                    Self::LargestOfMaximum => at_peak.fold(f64::NEG_INFINITY, f64::max),
                    _ => {
                        let (n, sum) = at_peak.fold((0usize, 0.), |(n, sum), y| (n + 1, sum + y));
                        sum / n as f64
                    }
                }
            }
        };
        Some(value)
    }
}
