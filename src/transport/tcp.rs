//! # TCP Transport
//!
//! Network printers accept raw ESC/POS on TCP port 9100 ("JetDirect" or raw
//! printing). Bytes written to the socket are printed as-is; reads return
//! status bytes the printer sends back.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use super::ByteChannel;
use crate::error::TransportError;

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// # Network Printer Channel
///
/// ```no_run
/// use columna::transport::{ByteChannel, TcpChannel};
///
/// let mut channel = TcpChannel::new("192.168.1.50", 9100);
/// channel.open()?;
/// channel.write(&[0x1B, 0x40])?;
/// channel.close()?;
/// # Ok::<(), columna::error::TransportError>(())
/// ```
pub struct TcpChannel {
    host: String,
    port: u16,
    timeout: Duration,
    stream: Option<TcpStream>,
}

impl TcpChannel {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: CONNECT_TIMEOUT,
            stream: None,
        }
    }

    /// Override the connect timeout (default 10 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn stream(&mut self) -> Result<&mut TcpStream, TransportError> {
        let endpoint = self.describe();
        self.stream.as_mut().ok_or(TransportError::NotOpen(endpoint))
    }
}

impl ByteChannel for TcpChannel {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let endpoint = self.describe();
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Open {
                endpoint: endpoint.clone(),
                source,
            })?;

        let mut last_err = None;
        for addr in addrs {
            debug!(%addr, "connecting");
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    // Small ESC/POS buffers should go out immediately
                    let _ = stream.set_nodelay(true);
                    info!(endpoint = %endpoint, "connected");
                    self.stream = Some(stream);
                    return Ok(());
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(TransportError::Open {
            endpoint,
            source: last_err.unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses")
            }),
        })
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        let endpoint = self.describe();
        self.stream()?
            .write(data)
            .map_err(|source| TransportError::Write { endpoint, source })
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let endpoint = self.describe();
        match self.stream()?.read(buf) {
            Ok(0) if !buf.is_empty() => Err(TransportError::Closed(endpoint)),
            Ok(n) => Ok(n),
            Err(source) => Err(TransportError::Read { endpoint, source }),
        }
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        let endpoint = self.describe();
        self.stream()?
            .flush()
            .map_err(|source| TransportError::Write { endpoint, source })
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        let endpoint = self.describe();
        stream.flush().map_err(|source| TransportError::Close {
            endpoint: endpoint.clone(),
            source,
        })?;
        match stream.shutdown(Shutdown::Both) {
            // Peer already hung up
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => {}
            Err(source) => return Err(TransportError::Close { endpoint, source }),
            Ok(()) => {}
        }
        info!(endpoint = %endpoint, "disconnected");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn describe(&self) -> String {
        format!("tcp:{}:{}", self.host, self.port)
    }
}
