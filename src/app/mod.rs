//! Application core: the control loop, zero direct I/O.
//!
//! This module holds the per-cycle orchestration: parse a telemetry line,
//! run inference, quantize the centroid and command the fan.  All
//! interaction with the device happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a serial port.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
