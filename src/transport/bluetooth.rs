//! # Bluetooth RFCOMM Transport
//!
//! This module talks to printers over the Bluetooth Serial Port Profile (SPP)
//! through a bound RFCOMM tty.
//!
//! ## Bluetooth Setup (Linux)
//!
//! The printer must already be paired and bound to an RFCOMM device:
//!
//! ```bash
//! $ bluetoothctl
//! [bluetooth]# pair 00:11:62:XX:XX:XX
//! $ sudo rfcomm bind 0 00:11:62:XX:XX:XX
//! # This creates /dev/rfcomm0
//! ```
//!
//! ## TTY Configuration
//!
//! The device is switched to raw mode so binary data passes unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, etc. cleared
//! - **No output processing**: OPOST cleared (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **No echo, non-canonical**: ECHO, ECHONL, ICANON cleared
//!
//! ## Chunked Writes
//!
//! Writes are split into 4096-byte chunks with a short pause between them so
//! the Bluetooth buffer on cheap printers does not overflow.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use super::ByteChannel;
use crate::error::TransportError;

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Bluetooth Printer Channel
///
/// ```no_run
/// use columna::transport::{ByteChannel, RfcommChannel};
///
/// let mut channel = RfcommChannel::new("/dev/rfcomm0");
/// channel.open()?;
/// channel.write(&[0x1B, 0x40])?;
/// # Ok::<(), columna::error::TransportError>(())
/// ```
pub struct RfcommChannel {
    path: PathBuf,
    file: Option<File>,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl RfcommChannel {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        }
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    fn file(&mut self) -> Result<&mut File, TransportError> {
        let endpoint = self.describe();
        self.file.as_mut().ok_or(TransportError::NotOpen(endpoint))
    }
}

impl ByteChannel for RfcommChannel {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.file.is_some() {
            return Ok(());
        }
        let endpoint = self.describe();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|source| TransportError::Open {
                endpoint: endpoint.clone(),
                source,
            })?;

        configure_tty_raw(&file).map_err(|e| TransportError::Configure {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

        info!(endpoint = %endpoint, "opened rfcomm device");
        self.file = Some(file);
        Ok(())
    }

    /// Writes all of `data`, chunked, and reports its full length.
    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        let endpoint = self.describe();
        let chunk_size = self.chunk_size;
        let delay = self.chunk_delay;
        let file = self.file()?;

        let chunks = data.len().div_ceil(chunk_size);
        for (i, chunk) in data.chunks(chunk_size).enumerate() {
            file.write_all(chunk).map_err(|source| TransportError::Write {
                endpoint: endpoint.clone(),
                source,
            })?;
            if i + 1 < chunks && !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        if chunks > 1 {
            debug!(endpoint = %endpoint, chunks, "chunked write");
        }
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let endpoint = self.describe();
        self.file()?
            .read(buf)
            .map_err(|source| TransportError::Read { endpoint, source })
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        let endpoint = self.describe();
        self.file()?
            .flush()
            .map_err(|source| TransportError::Write { endpoint, source })
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };
        let endpoint = self.describe();
        file.flush()
            .map_err(|source| TransportError::Close {
                endpoint: endpoint.clone(),
                source,
            })?;
        info!(endpoint = %endpoint, "closed rfcomm device");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn describe(&self) -> String {
        format!("bt:{}", self.path.display())
    }
}

/// Configure a tty for raw binary transfer.
///
/// ## What Gets Disabled
///
/// - **Input flags**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL, IXON, IXOFF, IXANY
/// - **Output flags**: OPOST
/// - **Local flags**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
/// - **Control flags**: CSIZE, PARENB (then CS8 is set)
///
/// IXON/IXOFF must be off: 0x11 (XON) and 0x13 (XOFF) appear in raster data
/// and GBK text.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    let mut termios = MaybeUninit::uninit();
    // SAFETY: fd is a valid open descriptor and termios points to writable memory
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: tcgetattr succeeded and filled the struct
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // SAFETY: fd is valid and termios is fully initialized
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> io::Result<()> {
    Ok(())
}
