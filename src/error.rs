//! Unified error types for the fan controller.
//!
//! Each concern gets its own enum so callers can match on exactly the
//! failures they can recover from; everything funnels into [`Error`] for the
//! control loop and the binary.
//!
//! | Kind              | When                         | Handling                 |
//! |-------------------|------------------------------|--------------------------|
//! | [`ConfigError`]   | setup, before the loop runs  | fatal, abort start-up    |
//! | [`TransportError`]| opening / using the port     | fatal, non-zero exit     |
//! | [`ParseError`]    | one telemetry line           | line skipped, loop goes on |
//! | [`InferenceError`]| inputs handed to the engine  | caller bug, reported     |

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("inference: {0}")]
    Inference(#[from] InferenceError),
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("protocol: {0}")]
    Parse(#[from] ParseError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Setup-time configuration problems.  Detected once, before the control
/// loop starts; any of them aborts start-up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Universe bounds are not finite, `min >= max`, or the step is not > 0,
    /// does not divide the range, or yields more than `MAX_SAMPLES` samples.
    #[error("invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    /// Breakpoints are not finite or not non-decreasing.
    #[error("malformed breakpoints {points:?}")]
    MalformedBreakpoints { points: Vec<f64> },

    /// A term's breakpoints leave its variable's universe.
    #[error("term '{term}' of '{variable}' has breakpoints outside the universe")]
    BreakpointOutsideUniverse { variable: String, term: String },

    #[error("variable '{variable}' defines term '{term}' twice")]
    DuplicateTerm { variable: String, term: String },

    #[error("variable '{0}' is registered twice")]
    DuplicateVariable(String),

    #[error("variable '{0}' has no terms")]
    EmptyVariable(String),

    /// No term has a degree above zero at some point of the universe.
    #[error("variable '{variable}' has a coverage gap at {at}")]
    CoverageGap { variable: String, at: f64 },

    #[error("rule {rule} references unknown variable '{variable}'")]
    UnknownVariable { rule: usize, variable: String },

    #[error("rule {rule} references unknown term '{term}' of '{variable}'")]
    UnknownTerm {
        rule: usize,
        variable: String,
        term: String,
    },

    /// An antecedent clause names a consequent variable or vice versa.
    #[error("rule {rule} uses '{variable}' in the wrong role")]
    RoleMismatch { rule: usize, variable: String },

    #[error("rule {rule} has weight {weight}, expected (0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },

    #[error("rule {0} has no antecedent clauses")]
    EmptyRule(usize),

    /// A single rule combined clauses with both AND and OR.
    #[error("rule mixes AND and OR connectives")]
    MixedConnectives,

    #[error("rule base has no consequent variable")]
    NoConsequent,

    /// A [`SystemConfig`](crate::config::SystemConfig) field failed range
    /// validation.  The message names the field and the allowed range.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),

    /// The configuration file could not be read or decoded.
    #[error("config file: {0}")]
    File(String),
}

// ---------------------------------------------------------------------------
// Inference errors
// ---------------------------------------------------------------------------

/// Problems with the crisp inputs handed to the engine for one cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("no input for antecedent '{0}'")]
    MissingInput(String),

    #[error("input '{0}' is not an antecedent variable")]
    UnknownInput(String),

    #[error("input '{variable}' is not finite ({value})")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("no output for consequent '{0}'")]
    MissingOutput(String),
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TransportError {
    /// The channel could not be opened.  No retry is attempted.
    #[error("failed to open '{port}': {reason}")]
    Open { port: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer went away or the channel accepted no bytes.
    #[error("channel closed")]
    Closed,
}

// ---------------------------------------------------------------------------
// Protocol parse errors
// ---------------------------------------------------------------------------

/// Reasons a telemetry line is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line does not carry the `SENSOR_DATA:` prefix.
    #[error("not a sensor data line")]
    NotSensorData,

    /// The prefix is present but the `T:<num>,H:<num>` pair is not.
    #[error("format not recognized")]
    Malformed,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
