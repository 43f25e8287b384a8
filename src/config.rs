//! System configuration parameters
//!
//! All tunable parameters for the fan controller.  Defaults match the
//! sensor node firmware; values can be overridden from a JSON file and then
//! from the command line.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fuzzy::Defuzzifier;

/// Finest accepted sampling step for any universe.
pub const MIN_STEP: f64 = 0.001;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Transport ---
    /// Serial device path or identifier (e.g. `/dev/ttyACM0`, `COM3`)
    pub port: String,
    /// Symbol rate of the serial link
    pub baud_rate: u32,
    /// Maximum wait for one read (milliseconds)
    pub read_timeout_ms: u64,
    /// Wait after opening the port before polling (milliseconds).
    /// Opening the port resets the sensor node.
    pub settle_delay_ms: u64,

    // --- Loop ---
    /// Sleep between poll attempts when no data is waiting (milliseconds)
    pub poll_interval_ms: u64,

    // --- Inference ---
    /// Sampling step of the temperature and humidity universes.
    /// Must divide both ranges (50 and 100) evenly.
    pub input_step: f64,
    /// Sampling step of the fan-speed universe used when defuzzifying.
    /// Must divide the range 0–3 evenly; 0.7 is rejected, 0.75 is fine.
    pub output_step: f64,
    /// Defuzzification method
    pub defuzzifier: Defuzzifier,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Transport
            port: "/dev/ttyACM0".into(),
            baud_rate: 9600,
            read_timeout_ms: 1000,
            settle_delay_ms: 2000,

            // Loop
            poll_interval_ms: 50, // 20 Hz

            // Inference
            input_step: 1.0,
            output_step: 0.01,
            defuzzifier: Defuzzifier::Centroid,
        }
    }
}

impl SystemConfig {
    /// Read a JSON config file.  Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::File(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text).map_err(|e| ConfigError::File(format!("{}: {e}", path.display())))
    }

    /// Reject values outside their operating range.  Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("port must not be empty"));
        }
        if !(300..=4_000_000).contains(&self.baud_rate) {
            return Err(ConfigError::ValidationFailed(
                "baud_rate must be 300–4000000",
            ));
        }
        if !(1..=60_000).contains(&self.read_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "read_timeout_ms must be 1–60000",
            ));
        }
        if self.settle_delay_ms > 30_000 {
            return Err(ConfigError::ValidationFailed(
                "settle_delay_ms must be 0–30000",
            ));
        }
        if !(1..=10_000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 1–10000",
            ));
        }
        if !(MIN_STEP..=5.0).contains(&self.input_step) {
            return Err(ConfigError::ValidationFailed(
                "input_step must be in [0.001, 5]",
            ));
        }
        // four fan levels on [0, 3] need at least four samples
        if !(MIN_STEP..=1.0).contains(&self.output_step) {
            return Err(ConfigError::ValidationFailed(
                "output_step must be in [0.001, 1]",
            ));
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
