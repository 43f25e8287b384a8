//! Integration tests for the transport → parse → infer → command pipeline.
//!
//! These run on the host and drive `ControlLoop` through a real `LineLink`
//! over a scripted transport, checking the exact bytes sent to the device.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use fuzzyfan::Error;
use fuzzyfan::adapters::link::LineLink;
use fuzzyfan::adapters::log_sink::LogEventSink;
use fuzzyfan::app::events::AppEvent;
use fuzzyfan::app::service::ControlLoop;
use fuzzyfan::config::SystemConfig;
use fuzzyfan::control::{FanController, FanLevel};
use fuzzyfan::error::{ParseError, TransportError};

use super::mock_link::{RecordingSink, ScriptedTransport};

const POLL: Duration = Duration::from_millis(1);

fn controller() -> FanController {
    FanController::new(&SystemConfig::default()).unwrap()
}

/// Run the loop over `chunks` until the script is exhausted.
fn run_script(chunks: &[&[u8]]) -> (ScriptedTransport, RecordingSink) {
    let c = controller();
    let shutdown = Arc::new(AtomicBool::new(false));
    let transport = ScriptedTransport::new(chunks.iter().copied())
        .stop_when_drained(Arc::clone(&shutdown));
    let mut link = LineLink::new(transport);
    let mut sink = RecordingSink::new();
    ControlLoop::new(&c)
        .run(&mut link, &mut sink, &shutdown, POLL)
        .unwrap();
    (link.into_inner(), sink)
}

// ── End-to-end scenarios ──────────────────────────────────────

#[test]
fn mild_reading_commands_medium() {
    let (t, sink) = run_script(&[b"SENSOR_DATA:T:22.5,H:35.0\n"]);
    assert_eq!(t.written_str(), "2\n");
    assert_eq!(t.flushes, 1);

    let prediction = sink.events.iter().find_map(|e| match e {
        AppEvent::Prediction { reading, command } => Some((*reading, *command)),
        _ => None,
    });
    let (reading, command) = prediction.expect("a prediction event");
    assert_eq!(reading.temperature, 22.5);
    assert_eq!(reading.humidity, 35.0);
    assert!((command.centroid - 1.7264).abs() < 1e-3);
    assert_eq!(command.level, FanLevel::Medium);
}

#[test]
fn extremes_command_off_and_high() {
    let (t, _) = run_script(&[b"SENSOR_DATA:T:0,H:0\nSENSOR_DATA:T:50,H:100\n"]);
    assert_eq!(t.written_str(), "0\n3\n");
}

#[test]
fn readings_beyond_the_universe_are_clamped() {
    let (t, _) = run_script(&[b"SENSOR_DATA:T:-12.0,H:140.0\n"]);
    // same as T=0, H=100: low & humid -> low
    assert_eq!(t.written_str(), "1\n");
}

#[test]
fn malformed_line_writes_nothing_and_loop_continues() {
    let (t, sink) = run_script(&[b"SENSOR_DATA:garbage\n", b"SENSOR_DATA:T:50,H:100\n"]);
    assert_eq!(t.written_str(), "3\n");
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::LineRejected { reason: ParseError::Malformed, .. }
        )),
        1
    );
}

#[test]
fn device_chatter_and_bad_frames_are_skipped() {
    let mut long = vec![b'x'; 300];
    long.push(b'\n');
    let (t, sink) = run_script(&[
        b"Arduino ready\r\n",
        &long,
        b"\xff\xfe\n",
        b"SENSOR_DATA:T:1.2.3,H:4\n",
        b"SENSOR_DATA:T:0,H:0\r\n",
    ]);
    assert_eq!(t.written_str(), "0\n");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FrameDropped(_))), 2);
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::LineRejected { reason: ParseError::InvalidNumber(_), .. }
        )),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::LineReceived(_))), 1);
}

#[test]
fn line_split_across_reads_is_reassembled() {
    let (t, _) = run_script(&[b"SENSOR_", b"DATA:T:50", b",H:100", b"\n"]);
    assert_eq!(t.written_str(), "3\n");
}

#[test]
fn unlisted_combination_sends_the_midpoint_level_every_time() {
    let (t, sink) = run_script(&[b"SENSOR_DATA:T:10,H:50\n".as_slice(); 3]);
    assert_eq!(t.written_str(), "2\n2\n2\n");
    let fallbacks = sink.count(|e| {
        matches!(e, AppEvent::Prediction { command, .. } if command.fallback && command.centroid == 1.5)
    });
    assert_eq!(fallbacks, 3);
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn events_are_bracketed_by_start_and_stop() {
    let (_, sink) = run_script(&[b"SENSOR_DATA:T:22.5,H:35.0\n"]);
    assert!(matches!(sink.events.first(), Some(AppEvent::Started { .. })));
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::Stopped { commands_sent: 1 })
    );
    let kinds: Vec<&str> = sink.events[1..sink.events.len() - 1]
        .iter()
        .map(|e| match e {
            AppEvent::LineReceived(_) => "recv",
            AppEvent::Prediction { .. } => "predict",
            AppEvent::CommandSent(_) => "send",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["recv", "predict", "send"]);
}

#[test]
fn preset_shutdown_exits_without_polling() {
    let c = controller();
    let shutdown = AtomicBool::new(true);
    let mut link = LineLink::new(ScriptedTransport::new([b"SENSOR_DATA:T:0,H:0\n"]));
    let mut sink = RecordingSink::new();
    ControlLoop::new(&c)
        .run(&mut link, &mut sink, &shutdown, POLL)
        .unwrap();
    assert!(link.transport().written.is_empty());
    assert_eq!(sink.events.len(), 2);
}

#[test]
fn transport_failure_ends_the_loop_with_an_error() {
    let c = controller();
    let shutdown = AtomicBool::new(false);
    let mut link =
        LineLink::new(ScriptedTransport::new([b"SENSOR_DATA:T:0,H:0\n"]).fail_when_drained());
    let mut sink = RecordingSink::new();
    let mut app = ControlLoop::new(&c);

    let err = app.run(&mut link, &mut sink, &shutdown, POLL).unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Io(_))));
    assert_eq!(link.transport().written_str(), "0\n");
    assert_eq!(app.commands_sent(), 1);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::Stopped { commands_sent: 1 })
    );
}

#[test]
fn log_sink_accepts_every_event() {
    let c = controller();
    let shutdown = Arc::new(AtomicBool::new(false));
    let transport = ScriptedTransport::new([&b"SENSOR_DATA:x\nSENSOR_DATA:T:10,H:50\n"[..]])
        .stop_when_drained(Arc::clone(&shutdown));
    let mut link = LineLink::new(transport);
    let mut sink = LogEventSink::new();
    let mut app = ControlLoop::new(&c);
    app.run(&mut link, &mut sink, &shutdown, POLL).unwrap();
    assert_eq!(app.lines_received(), 1);
    assert_eq!(app.lines_rejected(), 1);
    assert_eq!(app.fallbacks(), 1);
}
