//! # Paper and Font Configuration
//!
//! This module defines the paper widths and font scales supported by ESC/POS
//! receipt printers, and the line budget table that ties them together.
//!
//! ## Line Budget
//!
//! The line budget is the number of encoded bytes one physical printer line
//! can hold. A double-byte character (e.g. GBK Chinese) costs two bytes.
//!
//! | Paper | Normal | Double |
//! |-------|--------|--------|
//! | 58mm (Narrow) | 32 | 16 |
//! | 80mm (Wide) | 48 | 24 |
//!
//! These values match printer firmware defaults for Font A (12×24 dots).
//!
//! ## Usage
//!
//! ```
//! use columna::printer::{FontScale, PaperSpec, line_budget};
//!
//! assert_eq!(line_budget(PaperSpec::Wide, FontScale::Normal), 48);
//! assert_eq!(line_budget(PaperSpec::Narrow, FontScale::Double), 16);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// # Paper Specification
///
/// Physical paper roll width. Selects a row of the line budget table.
///
/// ## Print Area
///
/// ```text
/// Wide (80mm):   ├── 4mm ──┼────── 72mm printable (576 dots) ──────┼── 4mm ──┤
/// Narrow (58mm): ├─ 5mm ─┼─── 48mm printable (384 dots) ───┼─ 5mm ─┤
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSpec {
    /// 58mm paper
    Narrow,
    /// 80mm paper
    #[default]
    Wide,
}

impl PaperSpec {
    /// Map a paper width in millimetres to a spec.
    ///
    /// Only 80 selects [`PaperSpec::Wide`]; every other value falls back to
    /// [`PaperSpec::Narrow`], matching printer firmware defaults.
    pub fn from_mm(mm: u16) -> Self {
        match mm {
            80 => Self::Wide,
            _ => Self::Narrow,
        }
    }

    /// Paper roll width in millimetres.
    pub fn width_mm(&self) -> u16 {
        match self {
            Self::Narrow => 58,
            Self::Wide => 80,
        }
    }

    /// Printable width in dots at 203 DPI.
    pub fn print_width_dots(&self) -> u16 {
        match self {
            Self::Narrow => 384,
            Self::Wide => 576,
        }
    }

    /// Parse a paper spec from CLI or config text.
    ///
    /// Accepts `"58"`, `"58mm"`, `"narrow"`, `"80"`, `"80mm"`, `"wide"`.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "58" | "58mm" | "narrow" => Ok(Self::Narrow),
            "80" | "80mm" | "wide" => Ok(Self::Wide),
            other => Err(format!(
                "Unknown paper '{}'. Use 'narrow' (58mm) or 'wide' (80mm)",
                other
            )),
        }
    }
}

impl fmt::Display for PaperSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.width_mm())
    }
}

/// Character scale for a row. Double scale doubles both width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontScale {
    #[default]
    Normal,
    Double,
}

impl FontScale {
    /// Map a raw multiplier index (0 = 1x, 1 = 2x) to a scale.
    ///
    /// Unsupported values fail closed to [`FontScale::Normal`].
    pub fn from_multiplier(n: u8) -> Self {
        match n {
            1 => Self::Double,
            _ => Self::Normal,
        }
    }

    /// Character size parameter for `GS ! n` (width in the high nibble,
    /// height in the low nibble).
    pub fn size_param(&self) -> u8 {
        match self {
            Self::Normal => 0x00,
            Self::Double => 0x11,
        }
    }
}

/// Maximum number of text bytes on one physical line.
///
/// Never returns 0.
pub fn line_budget(paper: PaperSpec, scale: FontScale) -> usize {
    match (paper, scale) {
        (PaperSpec::Narrow, FontScale::Normal) => 32,
        (PaperSpec::Narrow, FontScale::Double) => 16,
        (PaperSpec::Wide, FontScale::Normal) => 48,
        (PaperSpec::Wide, FontScale::Double) => 24,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_budget_table() {
        assert_eq!(line_budget(PaperSpec::Narrow, FontScale::Normal), 32);
        assert_eq!(line_budget(PaperSpec::Narrow, FontScale::Double), 16);
        assert_eq!(line_budget(PaperSpec::Wide, FontScale::Normal), 48);
        assert_eq!(line_budget(PaperSpec::Wide, FontScale::Double), 24);
    }

    #[test]
    fn test_unknown_multiplier_fails_closed() {
        assert_eq!(FontScale::from_multiplier(0), FontScale::Normal);
        assert_eq!(FontScale::from_multiplier(1), FontScale::Double);
        assert_eq!(FontScale::from_multiplier(7), FontScale::Normal);
        let budget = line_budget(PaperSpec::Narrow, FontScale::from_multiplier(9));
        assert_eq!(budget, 32);
    }

    #[test]
    fn test_from_mm() {
        assert_eq!(PaperSpec::from_mm(80), PaperSpec::Wide);
        assert_eq!(PaperSpec::from_mm(58), PaperSpec::Narrow);
        assert_eq!(PaperSpec::from_mm(76), PaperSpec::Narrow);
    }

    #[test]
    fn test_parse() {
        assert_eq!(PaperSpec::parse("wide"), Ok(PaperSpec::Wide));
        assert_eq!(PaperSpec::parse("58mm"), Ok(PaperSpec::Narrow));
        assert_eq!(PaperSpec::parse(" 80 "), Ok(PaperSpec::Wide));
        assert!(PaperSpec::parse("a4").is_err());
    }

    #[test]
    fn test_print_width() {
        // 203 DPI ≈ 8 dots/mm: 72mm printable on 80mm paper
        assert_eq!(PaperSpec::Wide.print_width_dots(), 576);
        assert_eq!(PaperSpec::Narrow.print_width_dots(), 384);
        assert_eq!(PaperSpec::Wide.to_string(), "80mm");
    }

    #[test]
    fn test_size_param() {
        assert_eq!(FontScale::Normal.size_param(), 0x00);
        assert_eq!(FontScale::Double.size_param(), 0x11);
    }
}
