//! # Printer Transport Layer
//!
//! This module provides communication backends for sending print jobs to
//! printers. Every backend implements [`ByteChannel`]; the layout engine
//! never sees which one is in use.
//!
//! ## Available Transports
//!
//! - [`tcp`]: Raw TCP printing (port 9100)
//! - [`bluetooth`]: Bluetooth RFCOMM for wireless printing (Linux)
//! - [`usb`]: Linux `usblp` character devices
//! - [`memory`]: In-memory channel for tests and dry runs
//!
//! ## Sending a Job
//!
//! ```
//! use columna::job::PrintJob;
//! use columna::transport::{ByteChannel, memory::MemoryChannel, send_job};
//!
//! let mut job = PrintJob::new();
//! job.append(vec![0x1B, 0x40]);
//!
//! let mut channel = MemoryChannel::new();
//! let log = channel.log();
//! channel.open()?;
//! send_job(&mut channel, &job)?;
//! assert_eq!(log.bytes(), vec![0x1B, 0x40]);
//! # Ok::<(), columna::error::TransportError>(())
//! ```

pub mod bluetooth;
pub mod endpoint;
pub mod memory;
pub mod registry;
pub mod tcp;
pub mod usb;

pub use bluetooth::RfcommChannel;
pub use endpoint::Endpoint;
pub use memory::MemoryChannel;
pub use registry::ChannelRegistry;
pub use tcp::TcpChannel;
pub use usb::UsbLpChannel;

use tracing::debug;

use crate::error::TransportError;
use crate::job::PrintJob;
use crate::protocol::commands::{self, StatusKind};

/// A byte-oriented connection to a printer.
///
/// Errors are returned as-is; nothing here retries a failed operation.
pub trait ByteChannel {
    /// Open the underlying device or socket.
    fn open(&mut self) -> Result<(), TransportError>;

    /// Write some of `data`, returning how many bytes were accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError>;

    /// Read printer status bytes into `buf`.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;

    /// Flush buffered bytes to the device.
    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError>;

    fn is_open(&self) -> bool;

    /// Human-readable endpoint, used in logs and errors.
    fn describe(&self) -> String;
}

/// Write every buffer of `job` in order, continuing after partial writes.
///
/// Returns the number of bytes sent. The job is only borrowed, so a failed
/// send can be replayed as-is.
pub fn send_job(channel: &mut dyn ByteChannel, job: &PrintJob) -> Result<usize, TransportError> {
    if !channel.is_open() {
        return Err(TransportError::NotOpen(channel.describe()));
    }

    let mut sent = 0;
    for buffer in job.iter() {
        let mut rest = buffer;
        while !rest.is_empty() {
            let n = channel.write(rest)?;
            if n == 0 {
                return Err(TransportError::Closed(channel.describe()));
            }
            rest = &rest[n.min(rest.len())..];
            sent += n;
        }
    }
    channel.flush()?;

    debug!(endpoint = %channel.describe(), buffers = job.len(), bytes = sent, "sent print job");
    Ok(sent)
}

/// Ask the printer for one real-time status byte (DLE EOT n).
pub fn query_status(channel: &mut dyn ByteChannel, kind: StatusKind) -> Result<u8, TransportError> {
    let request = commands::realtime_status(kind);
    let mut rest = request.as_slice();
    while !rest.is_empty() {
        let n = channel.write(rest)?;
        if n == 0 {
            return Err(TransportError::Closed(channel.describe()));
        }
        rest = &rest[n.min(rest.len())..];
    }
    channel.flush()?;

    let mut status = [0u8; 1];
    match channel.read(&mut status)? {
        0 => Err(TransportError::Closed(channel.describe())),
        _ => Ok(status[0]),
    }
}
