//! # Print Job
//!
//! An append-only, ordered list of byte buffers bound for one printer.
//! Buffers are kept separate rather than flattened so the transport can write
//! them one by one, and so tests can compare opcode boundaries exactly.

/// Ordered byte buffers for one print.
///
/// Only [`append`](PrintJob::append) and [`append_all`](PrintJob::append_all)
/// mutate a job; once bytes are in they stay in, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintJob {
    buffers: Vec<Vec<u8>>,
}

impl PrintJob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one buffer. Empty buffers are ignored.
    pub fn append(&mut self, buffer: Vec<u8>) {
        if !buffer.is_empty() {
            self.buffers.push(buffer);
        }
    }

    /// Append buffers in order.
    pub fn append_all<I>(&mut self, buffers: I)
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        for buffer in buffers {
            self.append(buffer);
        }
    }

    /// Number of buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn buffers(&self) -> &[Vec<u8>] {
        &self.buffers
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.buffers.iter().map(Vec::as_slice)
    }

    /// Total number of bytes across all buffers.
    pub fn byte_len(&self) -> usize {
        self.buffers.iter().map(Vec::len).sum()
    }

    /// All buffers concatenated.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffers.concat()
    }

    pub fn into_buffers(self) -> Vec<Vec<u8>> {
        self.buffers
    }
}
