//! # ESC/POS Text Styling Commands
//!
//! Character size, emphasis and character-mode commands used by the layout
//! encoder.
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Size | GS ! n | Width/height multiplier |
//! | Bold | ESC E n | **Emphasized** text |
//! | Chinese mode | FS & / FS . | Double-byte character mode |
//! | Code table | ESC t n | Single-byte character table |

use super::commands::{ESC, FS, GS};
use crate::printer::FontScale;

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Bits 4–6 select the width multiplier, bits 0–2 the height multiplier
/// (0 = 1x ... 7 = 8x).
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
///
/// ```
/// use columna::protocol::text::character_size;
///
/// assert_eq!(character_size(1, 1), vec![0x1D, 0x21, 0x11]);
/// ```
pub fn character_size(width_mult: u8, height_mult: u8) -> Vec<u8> {
    let n = ((width_mult.min(7)) << 4) | height_mult.min(7);
    vec![GS, b'!', n]
}

/// Size command for a row's [`FontScale`].
#[inline]
pub fn font_scale(scale: FontScale) -> Vec<u8> {
    vec![GS, b'!', scale.size_param()]
}

// ============================================================================
// TEXT EMPHASIS (BOLD)
// ============================================================================

/// # Enable Emphasis (ESC E 1)
///
/// ```
/// use columna::protocol::text::{emphasis_on, emphasis_off};
///
/// let mut data = Vec::new();
/// data.extend(emphasis_on());
/// data.extend(b"TOTAL");
/// data.extend(emphasis_off());
/// ```
#[inline]
pub fn emphasis_on() -> Vec<u8> {
    vec![ESC, b'E', 1]
}

/// Disable emphasis (ESC E 0).
#[inline]
pub fn emphasis_off() -> Vec<u8> {
    vec![ESC, b'E', 0]
}

// ============================================================================
// CHARACTER MODE
// ============================================================================

/// Enter double-byte (Chinese/Kanji) character mode (FS &).
#[inline]
pub fn chinese_mode_on() -> Vec<u8> {
    vec![FS, b'&']
}

/// Leave double-byte character mode (FS .).
#[inline]
pub fn chinese_mode_off() -> Vec<u8> {
    vec![FS, b'.']
}

/// Select a single-byte character code table (ESC t n). Table 0 is PC437.
#[inline]
pub fn character_table(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

// ============================================================================
// TESTS
// ============================================================================
