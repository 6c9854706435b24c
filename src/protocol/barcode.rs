//! # ESC/POS Barcode and 2D Symbol Commands
//!
//! The printer firmware renders every symbol itself; these functions only wrap
//! the data bytes in the right command frames. No symbology math happens here.
//!
//! ## Function-code Framing (GS ( k)
//!
//! 2D symbols use `GS ( k pL pH cn fn [params]`, where `pL pH` is the
//! little-endian length of everything after them and `cn` selects the symbol
//! family (`0x30` PDF417, `0x31` QR Code).

use super::commands::{GS, u16_le};

/// Longest parameter block whose length (plus `cn fn`) fits in `pL pH`.
const MAX_PARAMS: usize = u16::MAX as usize - 2;

/// Frame a `GS ( k` function with its little-endian parameter length.
///
/// Parameters past [`MAX_PARAMS`] are dropped so the declared length always
/// matches the bytes that follow.
fn function(cn: u8, fn_code: u8, params: &[u8]) -> Vec<u8> {
    let params = &params[..params.len().min(MAX_PARAMS)];
    let [pl, ph] = u16_le((params.len() + 2) as u16);
    let mut out = Vec::with_capacity(params.len() + 7);
    out.extend([GS, b'(', b'k', pl, ph, cn, fn_code]);
    out.extend(params);
    out
}

// ============================================================================
// QR CODE
// ============================================================================

pub mod qr {
    use serde::Deserialize;

    use super::function;

    const CN: u8 = 0x31;

    /// QR Code error correction level
    ///
    /// | Level | Recovery |
    /// |-------|----------|
    /// | L | ~7% |
    /// | M | ~15% |
    /// | Q | ~25% |
    /// | H | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum QrErrorLevel {
        L = 48,
        #[default]
        M = 49,
        Q = 50,
        H = 51,
    }

    /// Select QR model 2 (fn 65).
    pub fn set_model2() -> Vec<u8> {
        function(CN, 0x41, &[50, 0])
    }

    /// Set module size in dots, 1–16 (fn 67).
    pub fn set_module_size(dots: u8) -> Vec<u8> {
        function(CN, 0x43, &[dots.clamp(1, 16)])
    }

    /// Set error correction level (fn 69).
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        function(CN, 0x45, &[level as u8])
    }

    /// Store symbol data (fn 80).
    pub fn store(data: &[u8]) -> Vec<u8> {
        let mut params = Vec::with_capacity(data.len() + 1);
        params.push(0x30);
        params.extend(data);
        function(CN, 0x50, &params)
    }

    /// Print the stored symbol (fn 81).
    pub fn print() -> Vec<u8> {
        function(CN, 0x51, &[0x30])
    }

    /// Complete QR sequence: model, size, error level, data, print.
    ///
    /// ```
    /// use columna::protocol::barcode::qr::{self, QrErrorLevel};
    ///
    /// let cmd = qr::generate(b"https://example.com", 6, QrErrorLevel::M);
    /// assert!(cmd.ends_with(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]));
    /// ```
    pub fn generate(data: &[u8], module_size: u8, level: QrErrorLevel) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(set_model2());
        out.extend(set_module_size(module_size));
        out.extend(set_error_correction(level));
        out.extend(store(data));
        out.extend(print());
        out
    }
}

// ============================================================================
// PDF417
// ============================================================================

pub mod pdf417 {
    use super::function;

    const CN: u8 = 0x30;

    /// Number of data columns, 0 = automatic (fn 65).
    pub fn set_columns(n: u8) -> Vec<u8> {
        function(CN, 0x41, &[n.min(30)])
    }

    /// Module width in dots, 2–8 (fn 67).
    pub fn set_module_width(dots: u8) -> Vec<u8> {
        function(CN, 0x43, &[dots.clamp(2, 8)])
    }

    /// Error correction level 0–8 (fn 69, level mode).
    pub fn set_ecc_level(level: u8) -> Vec<u8> {
        function(CN, 0x45, &[0x30, 0x30 + level.min(8)])
    }

    /// Store symbol data (fn 80).
    pub fn store(data: &[u8]) -> Vec<u8> {
        let mut params = Vec::with_capacity(data.len() + 1);
        params.push(0x30);
        params.extend(data);
        function(CN, 0x50, &params)
    }

    /// Print the stored symbol (fn 81).
    pub fn print() -> Vec<u8> {
        function(CN, 0x51, &[0x30])
    }

    /// Complete PDF417 sequence with automatic column count.
    pub fn generate(data: &[u8], module_width: u8, ecc_level: u8) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(set_columns(0));
        out.extend(set_module_width(module_width));
        out.extend(set_ecc_level(ecc_level));
        out.extend(store(data));
        out.extend(print());
        out
    }
}

// ============================================================================
// 1D BARCODES
// ============================================================================

pub mod barcode1d {
    use super::GS;

    /// Bar height in dots (GS h n).
    pub fn set_height(dots: u8) -> Vec<u8> {
        vec![GS, b'h', dots.max(1)]
    }

    /// Print human readable text below the bars (GS H 2), or hide it (GS H 0).
    pub fn set_hri_below(show: bool) -> Vec<u8> {
        vec![GS, b'H', if show { 2 } else { 0 }]
    }

    /// # Code128 (GS k 73 n data)
    ///
    /// The data is prefixed with `{B` (code set B), so plain ASCII prints as-is.
    /// Payloads longer than 253 bytes are truncated to the command's limit.
    ///
    /// ```
    /// use columna::protocol::barcode::barcode1d;
    ///
    /// let cmd = barcode1d::code128(b"AB12", 80);
    /// assert!(cmd.ends_with(&[0x1D, 0x6B, 73, 6, b'{', b'B', b'A', b'B', b'1', b'2']));
    /// ```
    pub fn code128(data: &[u8], height: u8) -> Vec<u8> {
        let data = &data[..data.len().min(253)];
        let mut out = Vec::new();
        out.extend(set_height(height));
        out.extend(set_hri_below(true));
        out.extend([GS, b'k', 73, (data.len() + 2) as u8, b'{', b'B']);
        out.extend(data);
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_framing() {
        assert_eq!(
            function(0x31, 0x43, &[6]),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 6]
        );
    }

    #[test]
    fn test_function_truncates_oversized_payload() {
        let cmd = function(0x31, 0x50, &vec![b'A'; 70_000]);
        assert_eq!(&cmd[3..5], &[0xFF, 0xFF]);
        assert_eq!(cmd.len(), 5 + 2 + MAX_PARAMS);
    }

    #[test]
    fn test_qr_oversized_data_matches_declared_length() {
        let cmd = qr::store(&vec![b'A'; 70_000]);
        let declared = u16::from_le_bytes([cmd[3], cmd[4]]) as usize;
        assert_eq!(cmd.len() - 5, declared);
        // The print command that follows stays intact
        let full = qr::generate(&vec![b'A'; 70_000], 4, qr::QrErrorLevel::L);
        assert!(full.ends_with(&qr::print()));
    }

    #[test]
    fn test_qr_store_length() {
        let cmd = qr::store(b"HELLO");
        // pL = 5 data + 3 (cn, fn, m)
        assert_eq!(&cmd[..8], &[0x1D, 0x28, 0x6B, 8, 0, 0x31, 0x50, 0x30]);
        assert_eq!(&cmd[8..], b"HELLO");
    }

    #[test]
    fn test_qr_settings() {
        assert_eq!(qr::set_model2(), vec![0x1D, 0x28, 0x6B, 4, 0, 0x31, 0x41, 50, 0]);
        assert_eq!(qr::set_module_size(0)[7], 1);
        assert_eq!(qr::set_module_size(40)[7], 16);
        assert_eq!(qr::set_error_correction(qr::QrErrorLevel::H)[7], 51);
    }

    #[test]
    fn test_qr_generate_order() {
        let cmd = qr::generate(b"X", 4, qr::QrErrorLevel::L);
        let mut expected = Vec::new();
        expected.extend(qr::set_model2());
        expected.extend(qr::set_module_size(4));
        expected.extend(qr::set_error_correction(qr::QrErrorLevel::L));
        expected.extend(qr::store(b"X"));
        expected.extend(qr::print());
        assert_eq!(cmd, expected);
    }

    #[test]
    fn test_pdf417_generate() {
        let cmd = pdf417::generate(b"DATA", 3, 2);
        assert!(cmd.starts_with(&pdf417::set_columns(0)));
        assert!(cmd.ends_with(&[0x1D, 0x28, 0x6B, 3, 0, 0x30, 0x51, 0x30]));
        assert_eq!(pdf417::set_ecc_level(2)[8], 0x32);
    }

    #[test]
    fn test_code128_truncates() {
        let long = vec![b'9'; 300];
        let cmd = barcode1d::code128(&long, 60);
        let header = barcode1d::set_height(60).len() + barcode1d::set_hri_below(true).len();
        assert_eq!(cmd[header + 3], 255);
        assert_eq!(cmd.len(), header + 4 + 2 + 253);
    }
}
