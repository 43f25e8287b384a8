//! Newline frame codec.
//!
//! Wire format, both directions:
//! ```text
//! ┌──────────────────────────┬────┐
//! │ ASCII payload (N B)      │ \n │   (an optional \r before \n is dropped)
//! └──────────────────────────┴────┘
//! ```
//!
//! The decoder accumulates incoming bytes into a fixed buffer and yields
//! complete lines.  This handles partial reads gracefully: a single
//! `Transport::read` call may return part of a line, or several lines
//! concatenated.

use heapless::{String, Vec};

use crate::control::FanLevel;

/// Longest accepted line, terminator excluded (protects against a device
/// that never sends a newline).
pub const MAX_LINE_LEN: usize = 128;

/// Encoded command size: one digit plus the newline.
pub const COMMAND_LEN: usize = 2;

/// One decoded line, whitespace-trimmed.
pub type Line = String<MAX_LINE_LEN>;

/// Outcome of a completed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Line(Line),
    /// The line exceeded [`MAX_LINE_LEN`] and was dropped up to its newline.
    Overlong,
    /// The line was not valid UTF-8 and was dropped.
    InvalidUtf8,
}

/// Streaming line decoder.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.  Returns a frame when `byte` terminates a line.
    /// Blank lines yield nothing.
    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        if byte == b'\n' {
            let frame = if self.overflowed {
                Some(Frame::Overlong)
            } else {
                self.complete()
            };
            self.reset();
            return frame;
        }
        if !self.overflowed && self.buf.push(byte).is_err() {
            self.overflowed = true;
        }
        None
    }

    /// Feed a chunk of bytes, yielding every frame it completes in order.
    pub fn feed<'a>(&'a mut self, data: &'a [u8]) -> impl Iterator<Item = Frame> + 'a {
        data.iter().filter_map(move |&b| self.push(b))
    }

    /// Bytes of the line currently being assembled.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drop any partial line (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }

    fn complete(&self) -> Option<Frame> {
        let Ok(text) = core::str::from_utf8(&self.buf) else {
            return Some(Frame::InvalidUtf8);
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let mut line = Line::new();
        match line.push_str(text) {
            Ok(()) => Some(Frame::Line(line)),
            Err(()) => Some(Frame::Overlong),
        }
    }
}

/// Encode a fan level as the device expects it: `b"2\n"`.
pub fn encode_command(level: FanLevel) -> [u8; COMMAND_LEN] {
    [b'0' + level.as_u8(), b'\n']
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(decoder: &mut LineDecoder, data: &[u8]) -> std::vec::Vec<Frame> {
        decoder.feed(data).collect()
    }

    fn line(s: &str) -> Frame {
        let mut l = Line::new();
        l.push_str(s).unwrap();
        Frame::Line(l)
    }

    #[test]
    fn yields_nothing_until_newline() {
        let mut d = LineDecoder::new();
        assert!(lines(&mut d, b"SENSOR_DATA:T:2").is_empty());
        assert_eq!(d.pending(), 15);
        assert_eq!(lines(&mut d, b"2.5,H:35.0\n"), vec![line("SENSOR_DATA:T:22.5,H:35.0")]);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn splits_several_lines_in_one_chunk() {
        let mut d = LineDecoder::new();
        let frames = lines(&mut d, b"READY\r\nSENSOR_DATA:T:1,H:2\r\n\r\nFAN=2\n");
        assert_eq!(frames, vec![line("READY"), line("SENSOR_DATA:T:1,H:2"), line("FAN=2")]);
    }

    #[test]
    fn overlong_line_is_dropped_until_newline() {
        let mut d = LineDecoder::new();
        let long = [b'x'; MAX_LINE_LEN + 10];
        assert!(lines(&mut d, &long).is_empty());
        assert_eq!(lines(&mut d, b"tail\nok\n"), vec![Frame::Overlong, line("ok")]);
    }

    #[test]
    fn line_of_exactly_max_len_is_kept() {
        let mut d = LineDecoder::new();
        let mut data = [b'a'; MAX_LINE_LEN + 1];
        data[MAX_LINE_LEN] = b'\n';
        let frames = lines(&mut d, &data);
        assert!(matches!(&frames[..], [Frame::Line(l)] if l.len() == MAX_LINE_LEN));
    }

    #[test]
    fn invalid_utf8_is_reported_and_skipped() {
        let mut d = LineDecoder::new();
        assert_eq!(lines(&mut d, b"\xff\xfe\nok\n"), vec![Frame::InvalidUtf8, line("ok")]);
    }

    #[test]
    fn reset_discards_partial_line() {
        let mut d = LineDecoder::new();
        let _ = lines(&mut d, b"garbage");
        d.reset();
        assert_eq!(lines(&mut d, b"ok\n"), vec![line("ok")]);
    }

    #[test]
    fn commands_are_a_digit_and_newline() {
        assert_eq!(&encode_command(FanLevel::Off), b"0\n");
        assert_eq!(&encode_command(FanLevel::Medium), b"2\n");
        assert_eq!(&encode_command(FanLevel::High), b"3\n");
    }
}
