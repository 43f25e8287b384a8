//! Sensor telemetry line parsing.
//!
//! The sensor node prints `SENSOR_DATA:T:<temperature>,H:<humidity>` once per
//! measurement and may interleave other chatter (boot banners, echoes of the
//! last command).  Only prefixed lines are telemetry.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

/// Marker that distinguishes telemetry from other device output.
pub const SENSOR_PREFIX: &str = "SENSOR_DATA:";

static READING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"T:(-?[\d.]+),H:(-?[\d.]+)").expect("sensor reading pattern is valid")
});

/// One crisp temperature / humidity pair as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
}

/// Parse one line of device output.
///
/// * [`ParseError::NotSensorData`]: no `SENSOR_DATA:` prefix
/// * [`ParseError::Malformed`]: prefix present, no `T:…,H:…` pair found
/// * [`ParseError::InvalidNumber`]: the pair matched but a number did not
///   parse (e.g. `1.2.3`) or overflowed to infinity
pub fn parse_sensor_line(line: &str) -> Result<SensorReading, ParseError> {
    let line = line.trim();
    if !line.starts_with(SENSOR_PREFIX) {
        return Err(ParseError::NotSensorData);
    }
    let caps = READING.captures(line).ok_or(ParseError::Malformed)?;
    let number = |i: usize| -> Result<f64, ParseError> {
        let text = &caps[i];
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber(text.to_owned()))
    };
    Ok(SensorReading {
        temperature: number(1)?,
        humidity: number(2)?,
    })
}
