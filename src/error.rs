//! # Error Types
//!
//! This module defines error types used throughout the columna library.
//!
//! Layout problems ([`ConfigError`], [`LayoutError`]) are caller mistakes and
//! are detected before any byte reaches a [`PrintJob`](crate::job::PrintJob).
//! Transport problems ([`TransportError`]) are expected at runtime and are
//! surfaced verbatim from the byte channel.

use std::io;

use thiserror::Error;

use crate::protocol::codepage::Codepage;

/// Invalid row or ticket configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A row must contain at least one column
    #[error("row has no columns")]
    EmptyRow,

    /// The weight vector does not match the column count
    #[error("{weights} weights supplied for {columns} columns")]
    WeightCountMismatch { weights: usize, columns: usize },

    /// Weights must be finite and strictly positive
    #[error("column {column} has invalid weight {weight}")]
    InvalidWeight { column: usize, weight: f64 },

    /// Codepage name not present in the codepage table
    #[error("unsupported codepage '{0}'")]
    UnsupportedCodepage(String),
}

/// Failure while laying out a row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A character has no representation in the active codepage
    #[error("column {column}: character {ch:?} cannot be encoded in {codepage}")]
    Encoding {
        column: usize,
        ch: char,
        codepage: Codepage,
    },
}

/// Byte channel failure, surfaced verbatim to the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint string could not be parsed or validated
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    /// Operation attempted before `open()` or after `close()`
    #[error("channel {0} is not open")]
    NotOpen(String),

    #[error("failed to open {endpoint}: {source}")]
    Open {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to configure {endpoint}: {reason}")]
    Configure { endpoint: String, reason: String },

    #[error("write to {endpoint} failed: {source}")]
    Write {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("read from {endpoint} failed: {source}")]
    Read {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to close {endpoint}: {source}")]
    Close {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    /// The peer closed the connection
    #[error("{0} closed the connection")]
    Closed(String),
}

/// Main error type for columna operations
#[derive(Debug, Error)]
pub enum ColumnaError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Ticket document could not be parsed
    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    /// No built-in receipt template with this name
    #[error("Unknown receipt '{0}'. Run `columna demo` to list them.")]
    UnknownReceipt(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<ConfigError> for ColumnaError {
    fn from(err: ConfigError) -> Self {
        Self::Layout(LayoutError::Config(err))
    }
}
