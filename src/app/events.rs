//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Every received telemetry
//! line, every prediction and every transmitted command shows up here.

use crate::error::ParseError;
use crate::fuzzy::Defuzzifier;
use crate::protocol::SensorReading;

use super::commands::FanCommand;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop is about to poll for the first time.
    Started { defuzzifier: Defuzzifier },

    /// A telemetry line arrived (carries the trimmed text).
    LineReceived(String),

    /// A telemetry line was discarded; the loop goes on.
    LineRejected { line: String, reason: ParseError },

    /// A frame was dropped before parsing (over-long or not UTF-8).
    FrameDropped(&'static str),

    /// Inference result for one reading.
    Prediction {
        reading: SensorReading,
        command: FanCommand,
    },

    /// The command was written to the device.
    CommandSent(FanCommand),

    /// The loop exited (carries the number of commands sent).
    Stopped { commands_sent: u64 },
}
