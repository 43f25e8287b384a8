//! Transport abstraction: any byte-oriented channel.
//!
//! Concrete implementations:
//! - Serial port (USB CDC to the sensor node), see `adapters::serial`
//! - In-memory script and capture buffers in the integration tests
//!
//! The control loop is generic over `Transport` through
//! [`LineLink`](crate::adapters::link::LineLink), so adding a new channel
//! requires no changes to the loop itself.

use crate::error::TransportError;

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug + Into<TransportError>;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read; 0 when the read timed out.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if data is waiting to be read.
    fn available(&mut self) -> Result<bool, Self::Error>;
}

/// A null transport that discards all writes and never reads.
/// Stands in for the device when exercising the loop without hardware.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = TransportError;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, TransportError> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn available(&mut self) -> Result<bool, TransportError> {
        Ok(false)
    }
}
