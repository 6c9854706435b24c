//! # Row Builder
//!
//! Lays out one logical [`Row`] as an ordered list of physical printer lines.
//!
//! ## Line Order
//!
//! ```text
//! main line            every column's first span, blank under full-row wraps
//! continuation lines   full-row wrap pieces, column by column
//! aligned lines 1..n   within-column wraps, side by side
//! ```
//!
//! A main line left with no text at all is dropped, so a lone column that
//! wraps starts printing on the first line.
//!
//! Every physical line's slot widths add up to the line budget, so columns
//! line up from one line to the next.

use tracing::debug;

use super::LayoutConfig;
use super::TrailingColumns;
use super::model::{Align, ColumnSpec, OverflowMode, Row};
use super::overflow::{self, OverflowKind, Resolution, Span};
use super::planner;
use crate::error::{ConfigError, LayoutError};
use crate::printer::{FontScale, line_budget};

/// Encoded text placed in one column slot of a physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Index of the source column.
    pub column: usize,
    pub bytes: Vec<u8>,
    pub alloc_width: usize,
    pub align: Align,
    pub bold: bool,
}

impl Segment {
    fn blank(column: usize, alloc_width: usize) -> Self {
        Self {
            column,
            bytes: Vec::new(),
            alloc_width,
            align: Align::Left,
            bold: false,
        }
    }

    fn text(column: usize, span: &Span, alloc_width: usize, spec: &ColumnSpec) -> Self {
        Self {
            column,
            bytes: span.bytes.clone(),
            alloc_width,
            align: spec.align,
            bold: spec.bold,
        }
    }

    /// True when the slot carries no text (only padding).
    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One printed line: segments left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhysicalLine {
    pub segments: Vec<Segment>,
}

impl PhysicalLine {
    /// Sum of the slot widths (the line budget).
    pub fn alloc_width(&self) -> usize {
        self.segments.iter().map(|s| s.alloc_width).sum()
    }
}

/// Lays out rows for one [`LayoutConfig`]. Holds no state between rows.
pub struct RowBuilder<'a> {
    config: &'a LayoutConfig,
}

impl<'a> RowBuilder<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out a row using each column's own weight.
    pub fn build(&self, row: &Row) -> Result<Vec<PhysicalLine>, LayoutError> {
        self.lay_out(row.font_scale, &row.weights(), &row.columns)
    }

    /// Lay out `columns` with an explicit weight list, which must have one
    /// entry per column. Column weights are ignored.
    pub fn build_weighted(
        &self,
        font_scale: FontScale,
        weights: &[f64],
        columns: &[ColumnSpec],
    ) -> Result<Vec<PhysicalLine>, LayoutError> {
        self.lay_out(font_scale, weights, columns)
    }

    fn lay_out(
        &self,
        font_scale: FontScale,
        weights: &[f64],
        columns: &[ColumnSpec],
    ) -> Result<Vec<PhysicalLine>, LayoutError> {
        if columns.is_empty() {
            return Err(ConfigError::EmptyRow.into());
        }
        if weights.len() != columns.len() {
            return Err(ConfigError::WeightCountMismatch {
                weights: weights.len(),
                columns: columns.len(),
            }
            .into());
        }

        let budget = line_budget(self.config.paper, font_scale);
        let widths = planner::allocate(weights, budget)?;
        let single = columns.len() == 1;

        let resolutions = columns
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let mode = match spec.overflow {
                    OverflowMode::WrapWithinColumn if single => OverflowMode::WrapFullRow,
                    mode => mode,
                };
                let span = match self.config.trailing_columns {
                    TrailingColumns::Omit => budget,
                    TrailingColumns::Reserve => widths[i],
                };
                overflow::resolve(
                    &spec.text,
                    widths[i],
                    span,
                    mode,
                    self.config.codepage,
                    self.config.ellipsis,
                )
                .map_err(|e| LayoutError::Encoding {
                    column: i,
                    ch: e.ch,
                    codepage: e.codepage,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let aligned = resolutions
            .iter()
            .map(|r| match r.kind {
                OverflowKind::WrappedFullRow => 1,
                _ => r.lines.len(),
            })
            .max()
            .unwrap_or(1);

        let full_row = resolutions.iter().any(|r| r.kind == OverflowKind::WrappedFullRow);

        let mut lines = Vec::with_capacity(aligned);
        let main = self.aligned_line(0, columns, &widths, &resolutions);
        if !full_row || main.segments.iter().any(|s| !s.is_blank()) {
            lines.push(main);
        }

        for (i, res) in resolutions.iter().enumerate() {
            if res.kind != OverflowKind::WrappedFullRow {
                continue;
            }
            for piece in &res.lines {
                lines.push(self.continuation_line(i, piece, columns, &widths, budget));
            }
        }

        for k in 1..aligned {
            lines.push(self.aligned_line(k, columns, &widths, &resolutions));
        }

        debug!(
            columns = columns.len(),
            budget,
            ?widths,
            physical_lines = lines.len(),
            "laid out row"
        );

        Ok(lines)
    }

    /// Line `k` of the side-by-side block. Full-row wraps stay blank here.
    fn aligned_line(
        &self,
        k: usize,
        columns: &[ColumnSpec],
        widths: &[usize],
        resolutions: &[Resolution],
    ) -> PhysicalLine {
        let segments = resolutions
            .iter()
            .enumerate()
            .map(|(i, res)| {
                let visible = res.kind != OverflowKind::WrappedFullRow;
                match res.lines.get(k) {
                    Some(span) if visible => Segment::text(i, span, widths[i], &columns[i]),
                    _ => Segment::blank(i, widths[i]),
                }
            })
            .collect();
        PhysicalLine { segments }
    }

    /// A dedicated line for one full-row wrap piece. With trailing columns
    /// omitted the piece owns the whole line; reserved, it keeps its own slot.
    fn continuation_line(
        &self,
        column: usize,
        piece: &Span,
        columns: &[ColumnSpec],
        widths: &[usize],
        budget: usize,
    ) -> PhysicalLine {
        let segments = match self.config.trailing_columns {
            TrailingColumns::Omit => vec![Segment::text(column, piece, budget, &columns[column])],
            TrailingColumns::Reserve => (0..widths.len())
                .map(|j| {
                    if j == column {
                        Segment::text(column, piece, widths[j], &columns[column])
                    } else {
                        Segment::blank(j, widths[j])
                    }
                })
                .collect(),
        };
        PhysicalLine { segments }
    }
}

// ============================================================================
// TESTS
// ============================================================================
