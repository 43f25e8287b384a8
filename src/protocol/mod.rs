//! Device protocol: byte channel, newline framing and telemetry parsing.
//!
//! ```text
//!  Transport ──▶ LineDecoder ──▶ parse_sensor_line ──▶ SensorReading
//!  Transport ◀── encode_command ◀── FanLevel
//! ```

pub mod codec;
pub mod parse;
pub mod transport;

pub use codec::{Frame, LineDecoder, encode_command};
pub use parse::{SensorReading, parse_sensor_line};
pub use transport::{NullTransport, Transport};
