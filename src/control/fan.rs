//! Fuzzy fan-speed controller
//!
//! Temperature and humidity in, one of four discrete fan levels out.
//!
//! | # | temperature | humidity | fan speed |
//! |---|-------------|----------|-----------|
//! | 1 | low         | dry      | off       |
//! | 2 | medium      | normal   | medium    |
//! | 3 | high        | humid    | high      |
//! | 4 | high        | normal   | high      |
//! | 5 | medium      | humid    | medium    |
//! | 6 | low         | humid    | low       |
//! | 7 | high        | dry      | medium    |
//!
//! Combinations not listed (e.g. low temperature with normal humidity) fire
//! no rule; the defuzzifier then returns the midpoint of the fan universe.

use core::fmt;

use crate::config::SystemConfig;
use crate::error::{ConfigError, InferenceError};
use crate::fuzzy::{
    Crisp, Defuzzifier, InferenceEngine, Inputs, LinguisticVariable, MembershipFunction, Rule,
    Universe,
};

pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const FAN_SPEED: &str = "fan_speed";

// ───────────────────────────────────────────────────────────────
// Fan levels
// ───────────────────────────────────────────────────────────────

/// Discrete actuator states understood by the sensor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FanLevel {
    Off = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl FanLevel {
    pub const MAX: FanLevel = FanLevel::High;
    pub const ALL: [FanLevel; 4] = [Self::Off, Self::Low, Self::Medium, Self::High];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable label, also the name of the matching fan-speed term.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for FanLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_u8())
    }
}

// ───────────────────────────────────────────────────────────────
// Rule base
// ───────────────────────────────────────────────────────────────

fn tri(a: f64, b: f64, c: f64) -> Result<MembershipFunction, ConfigError> {
    MembershipFunction::triangular(a, b, c)
}

/// Build and validate the variables and the seven rules.
///
/// `input_step` samples the two sensor universes for the coverage check;
/// `output_step` is the resolution of the fan universe when defuzzifying.
pub fn build_engine(input_step: f64, output_step: f64) -> Result<InferenceEngine, ConfigError> {
    let temperature = LinguisticVariable::antecedent(TEMPERATURE, Universe::new(0.0..=50.0, input_step)?)
        .term("low", tri(0., 0., 25.)?)?
        .term("medium", tri(20., 30., 40.)?)?
        .term("high", tri(35., 50., 50.)?)?;

    let humidity = LinguisticVariable::antecedent(HUMIDITY, Universe::new(0.0..=100.0, input_step)?)
        .term("dry", tri(0., 0., 40.)?)?
        .term("normal", tri(30., 50., 70.)?)?
        .term("humid", tri(60., 100., 100.)?)?;

    let max = f64::from(FanLevel::MAX.as_u8());
    let fan_universe = Universe::new(0.0..=max, output_step)?;
    // every level needs its own sample
    if fan_universe.len() < FanLevel::ALL.len() {
        return Err(ConfigError::InvalidUniverse {
            min: 0.,
            max,
            step: output_step,
        });
    }
    let fan_speed = LinguisticVariable::consequent(FAN_SPEED, fan_universe)
        .term(FanLevel::Off.label(), tri(0., 0., 1.)?)?
        .term(FanLevel::Low.label(), tri(0., 1., 2.)?)?
        .term(FanLevel::Medium.label(), tri(1., 2., 3.)?)?
        .term(FanLevel::High.label(), tri(2., 3., 3.)?)?;

    let rule = |t: &str, h: &str, fan: FanLevel| {
        Rule::when(TEMPERATURE, t)
            .and(HUMIDITY, h)
            .then(FAN_SPEED, fan.label())
    };
    let rules = vec![
        rule("low", "dry", FanLevel::Off)?,
        rule("medium", "normal", FanLevel::Medium)?,
        rule("high", "humid", FanLevel::High)?,
        rule("high", "normal", FanLevel::High)?,
        rule("medium", "humid", FanLevel::Medium)?,
        rule("low", "humid", FanLevel::Low)?,
        rule("high", "dry", FanLevel::Medium)?,
    ];

    InferenceEngine::new(vec![temperature, humidity, fan_speed], rules)
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The validated rule base plus the chosen defuzzification method.
///
/// Built once at start-up and shared by reference; it holds no per-cycle
/// state, so identical readings always produce identical output.
#[derive(Debug, Clone)]
pub struct FanController {
    engine: InferenceEngine,
    defuzzifier: Defuzzifier,
}

impl FanController {
    pub fn new(config: &SystemConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: build_engine(config.input_step, config.output_step)?,
            defuzzifier: config.defuzzifier,
        })
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn defuzzifier(&self) -> Defuzzifier {
        self.defuzzifier
    }

    pub fn inputs(temperature: f64, humidity: f64) -> Inputs {
        Inputs::new()
            .with(TEMPERATURE, temperature)
            .with(HUMIDITY, humidity)
    }

    /// Crisp fan speed for one reading, before rounding to a level.
    pub fn compute(&self, temperature: f64, humidity: f64) -> Result<Crisp, InferenceError> {
        let outputs = self
            .engine
            .infer(&Self::inputs(temperature, humidity), self.defuzzifier)?;
        outputs.require(FAN_SPEED)
    }
}
