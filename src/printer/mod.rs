//! # Printer Module
//!
//! This module provides paper and font configuration for receipt printers.
//!
//! ## Modules
//!
//! - [`config`]: Paper widths, font scales and the line budget table

pub mod config;

pub use config::{FontScale, PaperSpec, line_budget};
