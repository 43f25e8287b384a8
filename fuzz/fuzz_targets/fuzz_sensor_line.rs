//! Fuzz target: `parse_sensor_line` into the fan controller
//!
//! Any text the device might send must either be rejected or produce a
//! reading whose fan level lies in the device's level set.
//!
//! cargo fuzz run fuzz_sensor_line

#![no_main]

use std::sync::LazyLock;

use fuzzyfan::app::commands::FanCommand;
use fuzzyfan::config::SystemConfig;
use fuzzyfan::control::{FanController, FanLevel};
use fuzzyfan::protocol::parse_sensor_line;
use libfuzzer_sys::fuzz_target;

static CONTROLLER: LazyLock<FanController> =
    LazyLock::new(|| FanController::new(&SystemConfig::default()).expect("default rule base"));

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(reading) = parse_sensor_line(text) else {
        return;
    };
    // The parser only accepts digits, dots and a sign, so values are finite.
    let out = CONTROLLER
        .compute(reading.temperature, reading.humidity)
        .expect("finite readings always infer");
    assert!((0.0..=3.0).contains(&out.value));
    assert!(FanCommand::quantize(out.value) <= FanLevel::MAX);
});
