//! # USB Printer Transport (Linux)
//!
//! The kernel `usblp` driver exposes USB printer-class devices as
//! `/dev/usb/lpN`. Writes go straight to the bulk OUT endpoint and reads come
//! from bulk IN, so no tty setup is needed.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::ByteChannel;
use crate::error::TransportError;

/// Default usblp device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

pub struct UsbLpChannel {
    path: PathBuf,
    file: Option<File>,
}

impl UsbLpChannel {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
        }
    }

    fn file(&mut self) -> Result<&mut File, TransportError> {
        let endpoint = self.describe();
        self.file.as_mut().ok_or(TransportError::NotOpen(endpoint))
    }
}

impl ByteChannel for UsbLpChannel {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.file.is_some() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|source| TransportError::Open {
                endpoint: self.describe(),
                source,
            })?;
        info!(endpoint = %self.describe(), "opened usb printer");
        self.file = Some(file);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        let endpoint = self.describe();
        self.file()?
            .write(data)
            .map_err(|source| TransportError::Write { endpoint, source })
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
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|source| TransportError::Close {
                endpoint: self.describe(),
                source,
            })?;
            info!(endpoint = %self.describe(), "closed usb printer");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn describe(&self) -> String {
        format!("usb:{}", self.path.display())
    }
}
