//! # Row/Column Layout Engine
//!
//! Turns logical receipt rows into ESC/POS byte buffers.
//!
//! ## Pipeline
//!
//! ```text
//! Row ──► planner (widths) ──► overflow (spans) ──► row (physical lines) ──► encoder (bytes)
//!              ▲                     ▲
//!        line budget           measure (codepage widths)
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | [`measure`] | Encoded width of text, character-safe splitting |
//! | [`planner`] | Weights to byte widths |
//! | [`overflow`] | Per-column overflow policy |
//! | [`row`] | Physical lines for one row |
//! | [`encoder`] | Style opcodes and padded text |
//!
//! ## Example
//!
//! ```
//! use columna::job::PrintJob;
//! use columna::layout::{render_row, Align, ColumnSpec, LayoutConfig, Row};
//! use columna::printer::FontScale;
//!
//! let config = LayoutConfig::default();
//! let row = Row::new(FontScale::Normal)
//!     .column(ColumnSpec::new("Coffee").weight(3.0))
//!     .column(ColumnSpec::new("4.50").align(Align::Right));
//!
//! let mut job = PrintJob::new();
//! render_row(&row, &config, &mut job).unwrap();
//! assert_eq!(job.to_bytes().last(), Some(&b'\n'));
//! ```

pub mod encoder;
pub mod measure;
pub mod model;
pub mod overflow;
pub mod planner;
pub mod row;

pub use model::{Align, ColumnSpec, OverflowMode, Row};
pub use overflow::EllipsisRule;
pub use row::{PhysicalLine, RowBuilder, Segment};

use serde::Deserialize;

use crate::error::LayoutError;
use crate::job::PrintJob;
use crate::printer::PaperSpec;
use crate::protocol::codepage::Codepage;

/// How full-row wrap continuation lines treat the other columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingColumns {
    /// Each piece is split against and fills the whole line.
    #[default]
    Omit,
    /// Pieces keep the column width; the other columns stay blank.
    Reserve,
}

/// Layout settings shared by every row of a ticket.
///
/// The default codepage is the process-wide one (see
/// [`set_default_codepage`](crate::protocol::set_default_codepage)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub paper: PaperSpec,
    pub codepage: Codepage,
    pub trailing_columns: TrailingColumns,
    pub ellipsis: EllipsisRule,
}

impl LayoutConfig {
    pub fn new(paper: PaperSpec) -> Self {
        Self {
            paper,
            ..Self::default()
        }
    }

    pub fn with_codepage(mut self, codepage: Codepage) -> Self {
        self.codepage = codepage;
        self
    }

    pub fn with_trailing_columns(mut self, trailing_columns: TrailingColumns) -> Self {
        self.trailing_columns = trailing_columns;
        self
    }

    pub fn with_ellipsis(mut self, ellipsis: EllipsisRule) -> Self {
        self.ellipsis = ellipsis;
        self
    }
}

/// Lay out and encode `row`, then append it to `job`.
///
/// Nothing is appended if layout fails.
pub fn render_row(row: &Row, config: &LayoutConfig, job: &mut PrintJob) -> Result<(), LayoutError> {
    let lines = RowBuilder::new(config).build(row)?;
    job.append_all(encoder::encode(&lines, row.font_scale));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::printer::FontScale;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_from_partial_json() {
        let cfg: LayoutConfig =
            serde_json::from_str(r#"{"paper": "narrow", "codepage": "big5"}"#).unwrap();
        assert_eq!(cfg.paper, PaperSpec::Narrow);
        assert_eq!(cfg.codepage, Codepage::Big5);
        assert_eq!(cfg.trailing_columns, TrailingColumns::Omit);
        assert_eq!(cfg.ellipsis, EllipsisRule::WorstCaseDoubleByte);
    }

    #[test]
    fn test_render_row_appends() {
        let cfg = LayoutConfig::new(PaperSpec::Narrow).with_codepage(Codepage::Gbk);
        let mut job = PrintJob::new();
        let row = Row::new(FontScale::Normal).column(ColumnSpec::new("hello"));
        render_row(&row, &cfg, &mut job).unwrap();
        let mut expected = vec![0x1D, 0x21, 0x00];
        expected.extend(b"hello");
        expected.extend([b' '; 27]);
        expected.push(0x0A);
        assert_eq!(job.to_bytes(), expected);
    }

    #[test]
    fn test_render_row_failure_leaves_job_untouched() {
        let cfg = LayoutConfig::default().with_codepage(Codepage::Gbk);
        let mut job = PrintJob::new();
        job.append(b"header".to_vec());
        let row = Row::new(FontScale::Normal)
            .column(ColumnSpec::new("fine"))
            .column(ColumnSpec::new("bad 🍜"));
        let err = render_row(&row, &cfg, &mut job).unwrap_err();
        assert!(matches!(err, LayoutError::Encoding { column: 1, .. }));
        assert_eq!(job.to_bytes(), b"header".to_vec());

        let empty = Row::new(FontScale::Normal);
        assert_eq!(
            render_row(&empty, &cfg, &mut job),
            Err(LayoutError::Config(ConfigError::EmptyRow))
        );
        assert_eq!(job.len(), 1);
    }
}
