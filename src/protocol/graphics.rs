//! # ESC/POS Bitmap Commands
//!
//! Raster bit images and stored (NV) bitmaps. Callers supply already packed
//! 1-bit data: each byte holds 8 horizontal pixels, MSB leftmost, 1 = black.
//! Converting photos or drawings to that format is not this crate's job.
//!
//! ## Raster Format (GS v 0)
//!
//! ```text
//! GS v 0 m xL xH yL yH d1...dk
//!
//! x = width in bytes, y = height in dots, k = x * y
//! ```

use super::commands::{FS, GS, u16_le};

/// Raster print density mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterMode {
    #[default]
    Normal = 0,
    DoubleWidth = 1,
    DoubleHeight = 2,
    Quadruple = 3,
}

/// # Print Raster Bit Image (GS v 0)
///
/// `width_bytes * height` bytes of `data` are sent. Short data is padded with
/// white, extra data is dropped, so the command length always matches its
/// header.
///
/// ```
/// use columna::protocol::graphics::{raster, RasterMode};
///
/// let cmd = raster(RasterMode::Normal, 2, 1, &[0xFF, 0x00]);
/// assert_eq!(cmd, vec![0x1D, 0x76, 0x30, 0, 2, 0, 1, 0, 0xFF, 0x00]);
/// ```
pub fn raster(mode: RasterMode, width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let expected = width_bytes as usize * height as usize;
    let mut out = Vec::with_capacity(8 + expected);
    out.extend([GS, b'v', b'0', mode as u8]);
    out.extend(u16_le(width_bytes));
    out.extend(u16_le(height));
    if data.len() >= expected {
        out.extend(&data[..expected]);
    } else {
        out.extend(data);
        out.resize(8 + expected, 0x00);
    }
    out
}

/// Print NV bitmap number `n` (FS p n m) previously stored in flash.
pub fn nv_bitmap(n: u8, mode: RasterMode) -> Vec<u8> {
    vec![FS, b'p', n, mode as u8]
}
