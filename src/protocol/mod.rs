//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS command
//! set spoken by most thermal receipt printers. Every builder is a pure
//! function returning the exact bytes of one command; nothing here knows about
//! rows or columns.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, line feed, spacing, feed, cut)
//! - [`text`]: Character size, emphasis and character mode
//! - [`codepage`]: Codepage table used to measure and encode text
//! - [`cp437`]: Single-byte PC437 table
//! - [`graphics`]: Raster and NV bitmap commands
//! - [`barcode`]: QR codes, PDF417 and Code128
//!
//! ## Usage Example
//!
//! ```
//! use columna::protocol::{barcode, commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::chinese_mode_on());
//! data.extend(text::emphasis_on());
//! data.extend(b"RECEIPT");
//! data.extend(text::emphasis_off());
//! data.extend(commands::line_feed());
//! data.extend(barcode::qr::generate(b"https://example.com", 6, Default::default()));
//! data.extend(commands::feed_and_cut(false, 80));
//!
//! // Send `data` to printer via transport...
//! ```

pub mod barcode;
pub mod codepage;
pub mod commands;
pub mod cp437;
pub mod graphics;
pub mod text;

pub use codepage::{Codepage, default_codepage, set_default_codepage};
