//! # Ticket Documents
//!
//! JSON description of a ticket, rendered through [`Ticket`].
//!
//! ## Example
//!
//! ```json
//! {
//!   "paper": "narrow",
//!   "codepage": "gbk",
//!   "items": [
//!     {"type": "text", "content": "小面馆", "font_scale": "double", "bold": true, "align": "center"},
//!     {"type": "divider"},
//!     {"type": "row", "columns": [
//!       {"text": "牛肉面", "weight": 2},
//!       {"text": "x1", "align": "center"},
//!       {"text": "18.00", "align": "right"}
//!     ]},
//!     {"type": "qr_code", "data": "https://example.com/order/42"}
//!   ]
//! }
//! ```
//!
//! Layout fields (`paper`, `codepage`, `trailing_columns`, `ellipsis`) sit at
//! the top level next to `items`. A cut is appended unless `"cut": false`.

use serde::Deserialize;

use crate::error::{ColumnaError, LayoutError};
use crate::job::PrintJob;
use crate::layout::{Align, ColumnSpec, LayoutConfig, Row};
use crate::printer::FontScale;
use crate::protocol::barcode::qr::QrErrorLevel;
use crate::protocol::commands::DrawerPin;
use crate::ticket::{TextStyle, Ticket};

fn default_true() -> bool {
    true
}

fn default_cut_feed() -> u8 {
    80
}

fn default_module_size() -> u8 {
    6
}

fn default_module_width() -> u8 {
    3
}

fn default_ecc_level() -> u8 {
    2
}

fn default_barcode_height() -> u8 {
    80
}

/// Top-level JSON ticket.
#[derive(Debug, Deserialize)]
pub struct TicketDocument {
    #[serde(flatten)]
    pub layout: LayoutConfig,
    /// Emit ESC @ and the codepage select first (default: true).
    #[serde(default = "default_true")]
    pub init: bool,
    /// Feed and cut at the end (default: true).
    #[serde(default = "default_true")]
    pub cut: bool,
    #[serde(default)]
    pub partial_cut: bool,
    /// Motion units fed before the cut.
    #[serde(default = "default_cut_feed")]
    pub cut_feed: u8,
    pub items: Vec<TicketItem>,
}

/// One entry of [`TicketDocument::items`].
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TicketItem {
    Row(Row),
    /// Columns with an explicit weight list (one weight per column).
    WeightedRow {
        #[serde(default)]
        font_scale: FontScale,
        weights: Vec<f64>,
        columns: Vec<ColumnSpec>,
    },
    /// Equal-width columns from plain strings.
    Columns {
        #[serde(default)]
        font_scale: FontScale,
        texts: Vec<String>,
    },
    Text {
        content: String,
        #[serde(default)]
        font_scale: FontScale,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        align: Align,
    },
    Divider {
        #[serde(default)]
        font_scale: FontScale,
    },
    BlankLine,
    Feed {
        units: u8,
    },
    FeedLines {
        lines: u8,
    },
    /// `units` sets the spacing; omit it to restore the default.
    LineSpacing {
        #[serde(default)]
        units: Option<u8>,
    },
    QrCode {
        data: String,
        #[serde(default = "default_module_size")]
        module_size: u8,
        #[serde(default)]
        level: QrErrorLevel,
    },
    Pdf417 {
        data: String,
        #[serde(default = "default_module_width")]
        module_width: u8,
        #[serde(default = "default_ecc_level")]
        ecc_level: u8,
    },
    Code128 {
        data: String,
        #[serde(default = "default_barcode_height")]
        height: u8,
    },
    NvBitmap {
        n: u8,
    },
    CashDrawer {
        #[serde(default)]
        pin: DrawerPin,
    },
    Beep {
        times: u8,
        duration: u8,
    },
    Raw {
        bytes: Vec<u8>,
    },
}

impl TicketDocument {
    pub fn from_json(json: &str) -> Result<Self, ColumnaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render every item in order. Stops at the first item that fails to
    /// lay out.
    pub fn render(&self) -> Result<PrintJob, LayoutError> {
        let mut ticket = Ticket::new(self.layout);
        if self.init {
            ticket.init();
        }
        for item in &self.items {
            render_item(&mut ticket, item)?;
        }
        if self.cut {
            ticket.feed_and_cut(self.partial_cut, self.cut_feed);
        }
        Ok(ticket.finish())
    }
}

fn render_item(ticket: &mut Ticket, item: &TicketItem) -> Result<(), LayoutError> {
    match item {
        TicketItem::Row(row) => {
            ticket.row(row)?;
        }
        TicketItem::WeightedRow {
            font_scale,
            weights,
            columns,
        } => {
            ticket.weighted_row(*font_scale, weights, columns)?;
        }
        TicketItem::Columns { font_scale, texts } => {
            ticket.columns(*font_scale, texts)?;
        }
        TicketItem::Text {
            content,
            font_scale,
            bold,
            align,
        } => {
            let style = TextStyle {
                scale: *font_scale,
                bold: *bold,
                align: *align,
            };
            ticket.text(content, style)?;
        }
        TicketItem::Divider { font_scale } => {
            ticket.divider(*font_scale);
        }
        TicketItem::BlankLine => {
            ticket.blank_line();
        }
        TicketItem::Feed { units } => {
            ticket.feed(*units);
        }
        TicketItem::FeedLines { lines } => {
            ticket.feed_lines(*lines);
        }
        TicketItem::LineSpacing { units } => match units {
            Some(units) => {
                ticket.line_spacing(*units);
            }
            None => {
                ticket.default_line_spacing();
            }
        },
        TicketItem::QrCode {
            data,
            module_size,
            level,
        } => {
            ticket.qr_code(data.as_bytes(), *module_size, *level);
        }
        TicketItem::Pdf417 {
            data,
            module_width,
            ecc_level,
        } => {
            ticket.pdf417(data.as_bytes(), *module_width, *ecc_level);
        }
        TicketItem::Code128 { data, height } => {
            ticket.code128(data.as_bytes(), *height);
        }
        TicketItem::NvBitmap { n } => {
            ticket.nv_bitmap(*n, Default::default());
        }
        TicketItem::CashDrawer { pin } => {
            ticket.open_cash_drawer(*pin);
        }
        TicketItem::Beep { times, duration } => {
            ticket.beep(*times, *duration);
        }
        TicketItem::Raw { bytes } => {
            ticket.raw(bytes.clone());
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::layout::{OverflowMode, TrailingColumns};
    use crate::printer::PaperSpec;
    use crate::protocol::Codepage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_defaults() {
        let doc = TicketDocument::from_json(r#"{"items": []}"#).unwrap();
        assert!(doc.init);
        assert!(doc.cut);
        assert!(!doc.partial_cut);
        assert_eq!(doc.cut_feed, 80);
        assert_eq!(doc.layout.paper, PaperSpec::Wide);
        assert_eq!(doc.layout.trailing_columns, TrailingColumns::Omit);
    }

    #[test]
    fn test_parse_layout_fields() {
        let doc = TicketDocument::from_json(
            r#"{"paper": "narrow", "codepage": "cp437", "trailing_columns": "reserve", "items": []}"#,
        )
        .unwrap();
        assert_eq!(doc.layout.paper, PaperSpec::Narrow);
        assert_eq!(doc.layout.codepage, Codepage::Cp437);
        assert_eq!(doc.layout.trailing_columns, TrailingColumns::Reserve);
    }

    #[test]
    fn test_parse_items() {
        let doc = TicketDocument::from_json(
            r#"{"items": [
                {"type": "row", "font_scale": "double", "columns": [{"text": "a", "overflow": "ellipsis"}]},
                {"type": "columns", "texts": ["x", "y"]},
                {"type": "line_spacing"},
                {"type": "qr_code", "data": "hi", "level": "h"},
                {"type": "cash_drawer", "pin": "pin5"},
                {"type": "blank_line"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.items.len(), 6);
        match &doc.items[0] {
            TicketItem::Row(row) => {
                assert_eq!(row.font_scale, FontScale::Double);
                assert_eq!(row.columns[0].overflow, OverflowMode::Ellipsis);
            }
            other => panic!("expected row, got {other:?}"),
        }
        assert!(matches!(
            doc.items[3],
            TicketItem::QrCode {
                level: QrErrorLevel::H,
                module_size: 6,
                ..
            }
        ));
        assert!(matches!(
            doc.items[4],
            TicketItem::CashDrawer {
                pin: DrawerPin::Pin5
            }
        ));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = TicketDocument::from_json(r#"{"items": [{"type": "hologram"}]}"#).unwrap_err();
        assert!(matches!(err, ColumnaError::Document(_)));
    }

    #[test]
    fn test_render_order() {
        let doc = TicketDocument::from_json(
            r#"{"codepage": "gbk", "cut_feed": 16, "items": [
                {"type": "feed", "units": 10},
                {"type": "raw", "bytes": [7, 8]}
            ]}"#,
        )
        .unwrap();
        let job = doc.render().unwrap();
        assert_eq!(
            job.buffers(),
            &[
                vec![0x1B, 0x40],
                vec![0x1C, 0x26],
                vec![0x1B, 0x4A, 10],
                vec![7, 8],
                vec![0x1D, 0x56, 0x41, 16],
            ]
        );
    }

    #[test]
    fn test_render_without_init_or_cut() {
        let doc = TicketDocument::from_json(
            r#"{"init": false, "cut": false, "items": [{"type": "blank_line"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.render().unwrap().to_bytes(), vec![0x0A]);
    }

    #[test]
    fn test_render_reports_layout_error() {
        let doc = TicketDocument::from_json(
            r#"{"items": [{"type": "weighted_row", "weights": [1], "columns": [{"text": "a"}, {"text": "b"}]}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.render().unwrap_err(),
            LayoutError::Config(ConfigError::WeightCountMismatch {
                weights: 1,
                columns: 2
            })
        );
    }
}
