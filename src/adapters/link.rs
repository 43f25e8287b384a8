//! Line link adapter.
//!
//! Bridges any byte [`Transport`] to the [`TelemetryPort`] and
//! [`ActuatorPort`] traits: incoming bytes go through the newline decoder,
//! outgoing levels through the command encoder.

use std::collections::VecDeque;

use crate::app::ports::{ActuatorPort, TelemetryPort};
use crate::control::FanLevel;
use crate::error::TransportError;
use crate::protocol::{Frame, LineDecoder, Transport, encode_command};

/// Bytes pulled from the transport per read.
const READ_CHUNK: usize = 64;

/// Framed, line-oriented view of a byte transport.
pub struct LineLink<T: Transport> {
    transport: T,
    decoder: LineDecoder,
    pending: VecDeque<Frame>,
    buf: [u8; READ_CHUNK],
}

impl<T: Transport> LineLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: LineDecoder::new(),
            pending: VecDeque::new(),
            buf: [0; READ_CHUNK],
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the transport, dropping any partial line.
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> TelemetryPort for LineLink<T> {
    fn poll_frame(&mut self) -> Result<Option<Frame>, TransportError> {
        if let Some(frame) = self.pending.pop_front() {
            return Ok(Some(frame));
        }
        if !self.transport.available().map_err(Into::<TransportError>::into)? {
            return Ok(None);
        }
        let n = self.transport.read(&mut self.buf).map_err(Into::<TransportError>::into)?;
        self.pending.extend(self.decoder.feed(&self.buf[..n]));
        Ok(self.pending.pop_front())
    }
}

impl<T: Transport> ActuatorPort for LineLink<T> {
    fn send_level(&mut self, level: FanLevel) -> Result<(), TransportError> {
        let frame = encode_command(level);
        let mut written = 0;
        while written < frame.len() {
            match self.transport.write(&frame[written..]).map_err(Into::<TransportError>::into)? {
                0 => return Err(TransportError::Closed),
                n => written += n,
            }
        }
        self.transport.flush().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Delivers scripted chunks one read at a time, records writes.
    #[derive(Default)]
    struct Script {
        chunks: VecDeque<Vec<u8>>,
        written: Vec<u8>,
        write_limit: Option<usize>,
    }

    impl Transport for Script {
        type Error = TransportError;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
            let Some(chunk) = self.chunks.pop_front() else {
                return Ok(0);
            };
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }

        fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
            let n = self.write_limit.map_or(data.len(), |l| l.min(data.len()));
            self.written.extend_from_slice(&data[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), TransportError> {
            Ok(())
        }

        fn available(&mut self) -> Result<bool, TransportError> {
            Ok(!self.chunks.is_empty())
        }
    }

    fn text(frame: Option<Frame>) -> String {
        match frame {
            Some(Frame::Line(l)) => l.as_str().to_owned(),
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn reassembles_lines_across_reads() {
        let mut link = LineLink::new(Script {
            chunks: VecDeque::from([b"SENSOR_DA".to_vec(), b"TA:T:1,H:2\nREADY\n".to_vec()]),
            ..Default::default()
        });
        assert_eq!(link.poll_frame().unwrap(), None);
        assert_eq!(text(link.poll_frame().unwrap()), "SENSOR_DATA:T:1,H:2");
        assert_eq!(text(link.poll_frame().unwrap()), "READY");
        assert_eq!(link.poll_frame().unwrap(), None);
    }

    #[test]
    fn idle_transport_yields_nothing() {
        let mut link = LineLink::new(Script::default());
        assert_eq!(link.poll_frame().unwrap(), None);
    }

    #[test]
    fn short_writes_are_completed() {
        let mut link = LineLink::new(Script {
            write_limit: Some(1),
            ..Default::default()
        });
        link.send_level(FanLevel::High).unwrap();
        assert_eq!(link.into_inner().written, b"3\n");
    }

    #[test]
    fn zero_length_write_means_closed() {
        let mut link = LineLink::new(Script {
            write_limit: Some(0),
            ..Default::default()
        });
        assert!(matches!(link.send_level(FanLevel::Low), Err(TransportError::Closed)));
    }
}
