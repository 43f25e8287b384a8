//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] borrows the validated [`FanController`] and runs one
//! inference pass per telemetry line.  All I/O flows through port traits
//! injected at call sites, making the loop testable with mock adapters.
//!
//! ```text
//!  TelemetryPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                    │        ControlLoop          │
//!   ActuatorPort ◀── │ parse · infer · quantize    │
//!                    └────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info, warn};

use crate::control::FanController;
use crate::error::{Error, ParseError};
use crate::protocol::{Frame, parse_sensor_line};

use super::commands::FanCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, TelemetryPort};

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

/// Per-cycle orchestration over an immutable rule base.
pub struct ControlLoop<'a> {
    controller: &'a FanController,
    lines_received: u64,
    lines_rejected: u64,
    commands_sent: u64,
    fallbacks: u64,
}

impl<'a> ControlLoop<'a> {
    pub fn new(controller: &'a FanController) -> Self {
        Self {
            controller,
            lines_received: 0,
            lines_rejected: 0,
            commands_sent: 0,
            fallbacks: 0,
        }
    }

    // ── Per-line processing ───────────────────────────────────

    /// Process one line of device output.
    ///
    /// Returns the command that was sent, or `None` when the line was not
    /// telemetry or was rejected.  Only transport failures and inference
    /// failures are errors.
    pub fn handle_line(
        &mut self,
        line: &str,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<Option<FanCommand>, Error> {
        let reading = match parse_sensor_line(line) {
            Ok(reading) => reading,
            Err(ParseError::NotSensorData) => {
                debug!("ignoring device output: {line:?}");
                return Ok(None);
            }
            Err(reason) => {
                self.lines_rejected += 1;
                sink.emit(&AppEvent::LineRejected {
                    line: line.to_owned(),
                    reason,
                });
                return Ok(None);
            }
        };
        self.lines_received += 1;
        sink.emit(&AppEvent::LineReceived(line.trim().to_owned()));

        let crisp = self
            .controller
            .compute(reading.temperature, reading.humidity)?;
        let command = FanCommand::from_crisp(crisp);
        if command.fallback {
            self.fallbacks += 1;
            warn!(
                "no rule fired for T={} H={}, using midpoint {}",
                reading.temperature, reading.humidity, command.centroid
            );
        }
        sink.emit(&AppEvent::Prediction { reading, command });

        actuator.send_level(command.level)?;
        self.commands_sent += 1;
        sink.emit(&AppEvent::CommandSent(command));
        Ok(Some(command))
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Poll one frame and process it.
    ///
    /// Returns `Ok(false)` when nothing was waiting.  The `link` parameter
    /// satisfies **both** [`TelemetryPort`] and [`ActuatorPort`]; this avoids
    /// a double mutable borrow of the one channel.
    pub fn tick(
        &mut self,
        link: &mut (impl TelemetryPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<bool, Error> {
        match link.poll_frame()? {
            None => Ok(false),
            Some(Frame::Line(line)) => {
                self.handle_line(&line, link, sink)?;
                Ok(true)
            }
            Some(Frame::Overlong) => {
                self.lines_rejected += 1;
                sink.emit(&AppEvent::FrameDropped("line too long"));
                Ok(true)
            }
            Some(Frame::InvalidUtf8) => {
                self.lines_rejected += 1;
                sink.emit(&AppEvent::FrameDropped("invalid UTF-8"));
                Ok(true)
            }
        }
    }

    /// Run until `shutdown` is set or the transport fails.
    ///
    /// Frames are drained back to back; the loop sleeps `poll_interval`
    /// only when nothing is waiting, so it stays interruptible without
    /// busy-spinning.
    pub fn run(
        &mut self,
        link: &mut (impl TelemetryPort + ActuatorPort),
        sink: &mut impl EventSink,
        shutdown: &AtomicBool,
        poll_interval: Duration,
    ) -> Result<(), Error> {
        sink.emit(&AppEvent::Started {
            defuzzifier: self.controller.defuzzifier(),
        });
        info!("control loop started");

        let result = loop {
            if shutdown.load(Ordering::Relaxed) {
                break Ok(());
            }
            match self.tick(link, sink) {
                Ok(true) => {}
                Ok(false) => std::thread::sleep(poll_interval),
                Err(e) => break Err(e),
            }
        };

        sink.emit(&AppEvent::Stopped {
            commands_sent: self.commands_sent,
        });
        info!(
            "control loop stopped: {} lines, {} rejected, {} commands, {} fallbacks",
            self.lines_received, self.lines_rejected, self.commands_sent, self.fallbacks
        );
        result
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn controller(&self) -> &FanController {
        self.controller
    }

    /// Telemetry lines parsed successfully.
    pub fn lines_received(&self) -> u64 {
        self.lines_received
    }

    /// Telemetry lines and frames discarded.
    pub fn lines_rejected(&self) -> u64 {
        self.lines_rejected
    }

    pub fn commands_sent(&self) -> u64 {
        self.commands_sent
    }

    /// Cycles in which no rule fired.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }
}
