//! Serial-port transport (USB CDC to the sensor node).
//!
//! Reads are bounded by the configured timeout; a timed-out read reports
//! zero bytes so the control loop stays interruptible.  The port is closed
//! when the transport is dropped, on every exit path.

use std::io::{ErrorKind, Read, Write};

use log::{info, warn};
use serialport::SerialPort;

use crate::config::SystemConfig;
use crate::error::TransportError;
use crate::protocol::Transport;

pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialTransport {
    /// Open `config.port` at `config.baud_rate`, 8N1.
    pub fn open(config: &SystemConfig) -> Result<Self, TransportError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(config.read_timeout())
            .open()
            .map_err(|e| TransportError::Open {
                port: config.port.clone(),
                reason: e.to_string(),
            })?;
        info!("serial port {} open at {} baud", config.port, config.baud_rate);
        Ok(Self {
            port,
            name: config.port.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Transport for SerialTransport {
    type Error = TransportError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        Ok(self.port.write(data)?)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(self.port.flush()?)
    }

    fn available(&mut self) -> Result<bool, TransportError> {
        let waiting = self
            .port
            .bytes_to_read()
            .map_err(|e| TransportError::Io(e.into()))?;
        Ok(waiting > 0)
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if let Err(e) = self.port.flush() {
            warn!("serial port {}: flush on close failed: {e}", self.name);
        }
        info!("serial port {} closed", self.name);
    }
}
