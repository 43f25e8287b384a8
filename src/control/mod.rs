//! Control policy: the concrete fan rule base built on the fuzzy core.

pub mod fan;

pub use fan::{FAN_SPEED, FanController, FanLevel, HUMIDITY, TEMPERATURE, build_engine};
