//! # In-memory Transport
//!
//! Records every write instead of talking to hardware. Used for tests, dry
//! runs and hex dumps. The record is shared through a [`MemoryLog`] handle so
//! it stays readable after the channel is boxed into a registry.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ByteChannel;
use crate::error::TransportError;

/// Shared view of what a [`MemoryChannel`] has written.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemoryLog {
    fn lock(&self) -> MutexGuard<'_, Vec<Vec<u8>>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Each accepted write, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.lock().clone()
    }

    /// Everything written, concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().concat()
    }
}

/// A [`ByteChannel`] backed by memory.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    name: String,
    open: bool,
    log: MemoryLog,
    /// Canned status bytes returned by `read`.
    status: VecDeque<u8>,
    max_write: Option<usize>,
    fail_on_write: Option<usize>,
    fail_on_close: bool,
    write_count: usize,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Accept at most `n` bytes per write, to exercise partial writes.
    pub fn with_max_write(mut self, n: usize) -> Self {
        self.max_write = Some(n);
        self
    }

    /// Fail the write with this zero-based index.
    pub fn fail_on_write(mut self, index: usize) -> Self {
        self.fail_on_write = Some(index);
        self
    }

    /// Make `close` report an error. The channel still ends up closed.
    pub fn fail_on_close(mut self) -> Self {
        self.fail_on_close = true;
        self
    }

    /// Bytes later returned by `read`.
    pub fn with_status(mut self, bytes: &[u8]) -> Self {
        self.status.extend(bytes);
        self
    }

    pub fn log(&self) -> MemoryLog {
        self.log.clone()
    }
}

impl ByteChannel for MemoryChannel {
    fn open(&mut self) -> Result<(), TransportError> {
        self.open = true;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen(self.describe()));
        }
        let index = self.write_count;
        self.write_count += 1;
        if self.fail_on_write == Some(index) {
            return Err(TransportError::Write {
                endpoint: self.describe(),
                source: io::Error::new(io::ErrorKind::BrokenPipe, "injected failure"),
            });
        }

        let n = self.max_write.map_or(data.len(), |max| data.len().min(max));
        self.log.lock().push(data[..n].to_vec());
        Ok(n)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen(self.describe()));
        }
        let n = buf.len().min(self.status.len());
        for (slot, byte) in buf.iter_mut().zip(self.status.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.open = false;
        if self.fail_on_close {
            return Err(TransportError::Close {
                endpoint: self.describe(),
                source: io::Error::new(io::ErrorKind::BrokenPipe, "injected failure"),
            });
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
