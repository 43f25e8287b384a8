//! Fuzz target: `LineDecoder::feed`
//!
//! Drives arbitrary byte sequences into the streaming line decoder and
//! asserts that it never panics, never yields a line longer than its
//! buffer, and never yields a line containing a newline.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use fuzzyfan::protocol::Frame;
use fuzzyfan::protocol::LineDecoder;
use fuzzyfan::protocol::codec::MAX_LINE_LEN;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    // Split the input at an arbitrary point to exercise partial reads.
    let split = data.first().map_or(0, |&b| b as usize % (data.len() + 1));
    let (head, tail) = data.split_at(split);
    for chunk in [head, tail] {
        for frame in decoder.feed(chunk) {
            if let Frame::Line(line) = frame {
                assert!(line.len() <= MAX_LINE_LEN);
                assert!(!line.is_empty(), "blank lines must be skipped");
                assert!(!line.contains('\n'));
            }
        }
    }
    assert!(decoder.pending() <= MAX_LINE_LEN);

    // After a reset the decoder must accept bytes cleanly again.
    decoder.reset();
    let _ = decoder.feed(data).count();
});
