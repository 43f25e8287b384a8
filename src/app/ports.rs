//! Port traits: the hexagonal boundary between the control loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (serial link, event sinks) implement these traits.  The
//! [`ControlLoop`](super::service::ControlLoop) consumes them via generics,
//! so the domain core never touches the device directly.

use crate::control::FanLevel;
use crate::error::TransportError;
use crate::protocol::Frame;

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: device → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain device output.
pub trait TelemetryPort {
    /// Return the next complete frame if one is ready.
    ///
    /// `Ok(None)` means nothing is waiting; the caller decides how long to
    /// idle.  Implementations must bound any blocking wait.
    fn poll_frame(&mut self) -> Result<Option<Frame>, TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → device)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the fan.
pub trait ActuatorPort {
    /// Transmit one fan level and flush it to the device.
    fn send_level(&mut self, level: FanLevel) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
