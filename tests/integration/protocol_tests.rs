//! Integration tests for framing and parsing over a link.

use fuzzyfan::adapters::link::LineLink;
use fuzzyfan::app::ports::{ActuatorPort, TelemetryPort};
use fuzzyfan::control::FanLevel;
use fuzzyfan::error::ParseError;
use fuzzyfan::protocol::{Frame, NullTransport, parse_sensor_line};

use super::mock_link::ScriptedTransport;

fn drain(link: &mut LineLink<ScriptedTransport>) -> Vec<Frame> {
    let mut frames = Vec::new();
    while let Some(f) = link.poll_frame().unwrap() {
        frames.push(f);
    }
    frames
}

#[test]
fn frames_from_a_burst_parse_in_order() {
    let mut link = LineLink::new(ScriptedTransport::new([
        &b"SENSOR_DATA:T:21.0,H:40.0\r\nSENSOR_DATA:T:22.0,H:41.0\r\n"[..],
    ]));
    let readings: Vec<_> = drain(&mut link)
        .into_iter()
        .map(|f| match f {
            Frame::Line(l) => parse_sensor_line(&l).unwrap(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].temperature, 21.0);
    assert_eq!(readings[1].humidity, 41.0);
}

#[test]
fn parse_classifies_device_output() {
    assert_eq!(parse_sensor_line("booting"), Err(ParseError::NotSensorData));
    assert_eq!(parse_sensor_line("SENSOR_DATA:garbage"), Err(ParseError::Malformed));
    assert!(parse_sensor_line("SENSOR_DATA:T:0.0,H:0.0").is_ok());
}

#[test]
fn every_level_is_written_as_digit_and_newline() {
    let mut link = LineLink::new(ScriptedTransport::default());
    for level in FanLevel::ALL {
        link.send_level(level).unwrap();
    }
    let t = link.into_inner();
    assert_eq!(t.written_str(), "0\n1\n2\n3\n");
    assert_eq!(t.flushes, 4);
}

#[test]
fn null_transport_link_is_always_idle() {
    let mut link = LineLink::new(NullTransport);
    assert_eq!(link.poll_frame().unwrap(), None);
    link.send_level(FanLevel::High).unwrap();
}
