//! # ESC/POS Protocol Commands
//!
//! This module implements the basic ESC/POS commands understood by receipt
//! printer firmware (Epson TM series and the many compatible Chinese
//! 58mm/80mm printers).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`, `ESC 2`
//! - Multi-byte with parameters: `ESC 3 n`, `GS V m n`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

use serde::Deserialize;

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter, graphics and symbol commands.
pub const GS: u8 = 0x1D;

/// FS (File Separator) - Kanji / Chinese character mode prefix
pub const FS: u8 = 0x1C;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// DLE (Data Link Escape) - Real-time command prefix
///
/// Real-time commands are executed on receipt, even while the printer is
/// busy or offline.
pub const DLE: u8 = 0x10;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets text formatting, character size, line
/// spacing and character mode to power-on defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use columna::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// LINE CONTROL
// ============================================================================

/// Print the line buffer and feed one line (LF).
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

/// # Set Line Spacing (ESC 3 n)
///
/// Sets the line spacing to `n` motion units (typically 1/203 inch).
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC 3 n  |
/// | Hex     | 1B 33 n  |
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

/// Restore the default line spacing (ESC 2), about 1/6 inch.
#[inline]
pub fn default_line_spacing() -> Vec<u8> {
    vec![ESC, b'2']
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Print and Feed Paper (ESC J n)
///
/// Prints the buffer and feeds `n` motion units.
///
/// ```
/// use columna::protocol::commands;
///
/// assert_eq!(commands::feed_units(80), vec![0x1B, 0x4A, 80]);
/// ```
#[inline]
pub fn feed_units(n: u8) -> Vec<u8> {
    vec![ESC, b'J', n]
}

/// Print and feed `n` lines (ESC d n).
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// Full cut at the current position (GS V 0).
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// Partial cut at the current position (GS V 1).
///
/// Leaves a small hinge connecting the receipt to the roll.
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 1]
}

/// # Feed, Then Cut (GS V m n)
///
/// Feeds `n` motion units past the cutter position and cuts.
///
/// | m | Cut |
/// |---|-----|
/// | 65 ('A') | Full |
/// | 66 ('B') | Partial |
#[inline]
pub fn feed_and_cut(partial: bool, n: u8) -> Vec<u8> {
    let m = if partial { b'B' } else { b'A' };
    vec![GS, b'V', m, n]
}

// ============================================================================
// PERIPHERALS AND STATUS
// ============================================================================

/// Cash drawer kick-out connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerPin {
    #[default]
    Pin2 = 0,
    Pin5 = 1,
}

/// # Generate Pulse in Real Time (DLE DC4 1 m t)
///
/// Opens a cash drawer by pulsing connector pin `m`. The pulse lasts
/// `t * 100ms` (clamped to 1–8).
///
/// ```
/// use columna::protocol::commands::{self, DrawerPin};
///
/// assert_eq!(commands::cash_drawer_pulse(DrawerPin::Pin2, 1), vec![0x10, 0x14, 1, 0, 1]);
/// ```
#[inline]
pub fn cash_drawer_pulse(pin: DrawerPin, t: u8) -> Vec<u8> {
    vec![DLE, 0x14, 1, pin as u8, t.clamp(1, 8)]
}

/// Sound the buzzer `times` times for `duration * 100ms` each (ESC B n t).
#[inline]
pub fn buzzer(times: u8, duration: u8) -> Vec<u8> {
    vec![ESC, b'B', times.clamp(1, 9), duration.clamp(1, 9)]
}

/// Real-time status group for [`realtime_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Printer = 1,
    Offline = 2,
    Error = 3,
    PaperSensor = 4,
}

/// # Transmit Real-time Status (DLE EOT n)
///
/// The printer answers with one status byte.
#[inline]
pub fn realtime_status(kind: StatusKind) -> Vec<u8> {
    vec![DLE, 0x04, kind as u8]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use columna::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
