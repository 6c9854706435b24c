//! # Row Model
//!
//! Caller-facing description of one logical receipt row.
//!
//! ## Example
//!
//! ```
//! use columna::layout::{Align, ColumnSpec, OverflowMode, Row};
//! use columna::printer::FontScale;
//!
//! let row = Row::new(FontScale::Normal)
//!     .column(ColumnSpec::new("宫保鸡丁").weight(2.0))
//!     .column(ColumnSpec::new("x2").align(Align::Center))
//!     .column(ColumnSpec::new("36.00").align(Align::Right).bold(true))
//!     .column(ColumnSpec::new("note").overflow(OverflowMode::Ellipsis));
//!
//! assert_eq!(row.columns.len(), 4);
//! ```

use serde::Deserialize;

use crate::error::ConfigError;
use crate::printer::FontScale;

/// Horizontal placement of text inside its column slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// What to do when a column's text is wider than its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowMode {
    /// Print as-is and let the printer wrap.
    None,
    /// Truncate and append `...`.
    Ellipsis,
    /// Leave the slot blank and print the text on dedicated full-width lines.
    #[default]
    WrapFullRow,
    /// Continue on following lines inside the same slot.
    WrapWithinColumn,
}

fn default_weight() -> f64 {
    1.0
}

/// One column of a row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSpec {
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub overflow: OverflowMode,
}

impl ColumnSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: default_weight(),
            bold: false,
            align: Align::Left,
            overflow: OverflowMode::default(),
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = overflow;
        self
    }
}

/// A logical row: one font scale, one or more columns.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub font_scale: FontScale,
    pub columns: Vec<ColumnSpec>,
}

impl Row {
    pub fn new(font_scale: FontScale) -> Self {
        Self {
            font_scale,
            columns: Vec::new(),
        }
    }

    /// Append a column.
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Build a row from parallel weight and text lists, every column using
    /// `overflow`.
    ///
    /// The lists must be the same length.
    pub fn from_texts<S: AsRef<str>>(
        font_scale: FontScale,
        weights: &[f64],
        texts: &[S],
        overflow: OverflowMode,
    ) -> Result<Self, ConfigError> {
        if weights.len() != texts.len() {
            return Err(ConfigError::WeightCountMismatch {
                weights: weights.len(),
                columns: texts.len(),
            });
        }
        let columns = weights
            .iter()
            .zip(texts)
            .map(|(w, t)| ColumnSpec::new(t.as_ref()).weight(*w).overflow(overflow))
            .collect();
        Ok(Self {
            font_scale,
            columns,
        })
    }

    pub fn weights(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.weight).collect()
    }
}
