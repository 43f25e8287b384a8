//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (printed by the binary's tracing subscriber).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { defuzzifier } => {
                info!("START | waiting for sensor data, defuzzifier={defuzzifier:?}");
            }
            AppEvent::LineReceived(line) => {
                info!("RECV  | {line}");
            }
            AppEvent::LineRejected { line, reason } => {
                warn!("SKIP  | {reason}: {line:?}");
            }
            AppEvent::FrameDropped(reason) => {
                warn!("DROP  | {reason}");
            }
            AppEvent::Prediction { reading, command } => {
                info!(
                    "FUZZY | T={:.1} H={:.1} | centroid={:.3}{} | level={}",
                    reading.temperature,
                    reading.humidity,
                    command.centroid,
                    if command.fallback { " (no rule fired)" } else { "" },
                    command.level,
                );
            }
            AppEvent::CommandSent(command) => {
                info!("SEND  | {}", command.level.as_u8());
            }
            AppEvent::Stopped { commands_sent } => {
                info!("STOP  | {commands_sent} commands sent");
            }
        }
        debug!("event: {event:?}");
    }
}
