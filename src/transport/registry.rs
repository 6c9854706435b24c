//! # Channel Registry
//!
//! Open channels keyed by endpoint. The registry is an ordinary owned value:
//! create one at startup, pass it where printing happens, and drop it (or
//! call [`disconnect_all`](ChannelRegistry::disconnect_all)) on shutdown.
//! `print` takes `&mut self`, so one job at a time goes through a registry.

use std::collections::HashMap;

use tracing::{info, warn};

use super::{ByteChannel, Endpoint, send_job};
use crate::error::TransportError;
use crate::job::PrintJob;

#[derive(Default)]
pub struct ChannelRegistry {
    channels: HashMap<Endpoint, Box<dyn ByteChannel + Send>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a channel for `endpoint` unless one is already open.
    pub fn connect(&mut self, endpoint: &Endpoint) -> Result<(), TransportError> {
        if self.is_connected(endpoint) {
            return Ok(());
        }
        self.connect_with(endpoint.clone(), endpoint.channel())
    }

    /// Register and open a caller-supplied channel, replacing any previous
    /// one for the endpoint. A failed close of the previous channel is logged
    /// and does not stop the new one from opening.
    pub fn connect_with(
        &mut self,
        endpoint: Endpoint,
        mut channel: Box<dyn ByteChannel + Send>,
    ) -> Result<(), TransportError> {
        if let Some(mut old) = self.channels.remove(&endpoint) {
            if let Err(e) = old.close() {
                warn!(endpoint = %endpoint, error = %e, "close of replaced channel failed");
            }
        }
        channel.open()?;
        info!(endpoint = %endpoint, "channel registered");
        self.channels.insert(endpoint, channel);
        Ok(())
    }

    pub fn is_connected(&self, endpoint: &Endpoint) -> bool {
        self.channels.get(endpoint).is_some_and(|ch| ch.is_open())
    }

    /// Send `job` to a connected endpoint. Returns the bytes sent.
    pub fn print(&mut self, endpoint: &Endpoint, job: &PrintJob) -> Result<usize, TransportError> {
        let channel = self
            .channels
            .get_mut(endpoint)
            .ok_or_else(|| TransportError::NotOpen(endpoint.to_string()))?;
        send_job(channel.as_mut(), job)
    }

    /// Close and forget one endpoint. Unknown endpoints are a no-op.
    pub fn disconnect(&mut self, endpoint: &Endpoint) -> Result<(), TransportError> {
        match self.channels.remove(endpoint) {
            Some(mut channel) => channel.close(),
            None => Ok(()),
        }
    }

    /// Close every channel. All channels are closed even if some fail; the
    /// first error is returned.
    pub fn disconnect_all(&mut self) -> Result<(), TransportError> {
        let mut first_err = None;
        for (endpoint, mut channel) in self.channels.drain() {
            if let Err(e) = channel.close() {
                warn!(endpoint = %endpoint, error = %e, "close failed");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Drop for ChannelRegistry {
    fn drop(&mut self) {
        let _ = self.disconnect_all();
    }
}
