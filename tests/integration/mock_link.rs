//! Mock transport and sink adapters for integration tests.
//!
//! Records every write and every event so tests can assert on the full
//! history without touching a real serial port.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use fuzzyfan::app::events::AppEvent;
use fuzzyfan::app::ports::EventSink;
use fuzzyfan::error::TransportError;
use fuzzyfan::protocol::Transport;

// ── ScriptedTransport ─────────────────────────────────────────

/// Serves scripted read chunks in order and captures writes.
///
/// Once the script is exhausted it either raises `shutdown` (so
/// `ControlLoop::run` returns) or, with `fail_when_drained`, reports an I/O
/// error as a vanished device would.
#[derive(Default)]
pub struct ScriptedTransport {
    chunks: VecDeque<Vec<u8>>,
    pub written: Vec<u8>,
    pub flushes: usize,
    shutdown: Option<Arc<AtomicBool>>,
    fail_when_drained: bool,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            ..Default::default()
        }
    }

    pub fn stop_when_drained(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = Some(flag);
        self
    }

    pub fn fail_when_drained(mut self) -> Self {
        self.fail_when_drained = true;
        self
    }

    pub fn written_str(&self) -> &str {
        std::str::from_utf8(&self.written).unwrap()
    }
}

impl Transport for ScriptedTransport {
    type Error = TransportError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        self.written.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.flushes += 1;
        Ok(())
    }

    fn available(&mut self) -> Result<bool, TransportError> {
        if !self.chunks.is_empty() {
            return Ok(true);
        }
        if self.fail_when_drained {
            return Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "device unplugged",
            )));
        }
        if let Some(flag) = &self.shutdown {
            flag.store(true, Ordering::Relaxed);
        }
        Ok(false)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
