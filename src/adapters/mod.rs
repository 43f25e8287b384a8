//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                  | Connects to          |
//! |------------|-----------------------------|----------------------|
//! | `link`     | TelemetryPort, ActuatorPort | any `Transport`      |
//! | `serial`   | Transport                   | serial device        |
//! | `log_sink` | EventSink                   | `log` facade         |

pub mod link;
pub mod log_sink;
#[cfg(feature = "serial")]
pub mod serial;
