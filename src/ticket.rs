//! # Ticket Builder
//!
//! Builds one printed ticket: laid-out rows, full-width text, dividers, feeds,
//! symbols and a final cut, in the order they are added.
//!
//! ## Example
//!
//! ```
//! use columna::layout::{Align, ColumnSpec, LayoutConfig, Row};
//! use columna::printer::FontScale;
//! use columna::ticket::{Ticket, TextStyle};
//!
//! let mut ticket = Ticket::new(LayoutConfig::default());
//! ticket.init();
//! ticket
//!     .text("CHURRA MART", TextStyle::title())
//!     .unwrap()
//!     .divider(FontScale::Normal);
//! ticket
//!     .columns(FontScale::Normal, &["Espresso", "x1", "4.50"])
//!     .unwrap();
//! ticket.feed(80).cut(false);
//!
//! let job = ticket.finish();
//! assert!(job.byte_len() > 0);
//! ```
//!
//! Layout failures leave the ticket exactly as it was before the call.

use crate::error::LayoutError;
use crate::job::PrintJob;
use crate::layout::{self, Align, ColumnSpec, LayoutConfig, OverflowMode, Row, RowBuilder};
use crate::printer::{FontScale, line_budget};
use crate::protocol::barcode::{barcode1d, pdf417, qr};
use crate::protocol::commands::{self, DrawerPin};
use crate::protocol::graphics::{self, RasterMode};
use crate::protocol::text;

/// Style for a full-width text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub scale: FontScale,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    /// Double size, bold, centered.
    pub fn title() -> Self {
        Self {
            scale: FontScale::Double,
            bold: true,
            align: Align::Center,
        }
    }

    pub fn centered() -> Self {
        Self {
            align: Align::Center,
            ..Self::default()
        }
    }
}

/// Per-ticket builder owning its [`PrintJob`] until [`finish`](Ticket::finish).
#[derive(Debug, Clone)]
pub struct Ticket {
    config: LayoutConfig,
    job: PrintJob,
}

impl Ticket {
    /// An empty ticket. Call [`init`](Ticket::init) first to reset the
    /// printer.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            job: PrintJob::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Line budget for `scale` on this ticket's paper.
    pub fn budget(&self, scale: FontScale) -> usize {
        line_budget(self.config.paper, scale)
    }

    /// Reset the printer (ESC @) and select the ticket's codepage.
    pub fn init(&mut self) -> &mut Self {
        self.job.append(commands::init());
        self.job.append(self.config.codepage.select_command());
        self
    }

    // ========================================================================
    // Rows and text
    // ========================================================================

    /// Lay out and append a row.
    pub fn row(&mut self, row: &Row) -> Result<&mut Self, LayoutError> {
        layout::render_row(row, &self.config, &mut self.job)?;
        Ok(self)
    }

    /// Append `columns` laid out with an explicit weight list.
    pub fn weighted_row(
        &mut self,
        scale: FontScale,
        weights: &[f64],
        columns: &[ColumnSpec],
    ) -> Result<&mut Self, LayoutError> {
        let lines = RowBuilder::new(&self.config).build_weighted(scale, weights, columns)?;
        self.job.append_all(layout::encoder::encode(&lines, scale));
        Ok(self)
    }

    /// Equal-width, left-aligned columns that wrap onto full rows.
    pub fn columns<S: AsRef<str>>(
        &mut self,
        scale: FontScale,
        texts: &[S],
    ) -> Result<&mut Self, LayoutError> {
        let weights = vec![1.0; texts.len()];
        let row = Row::from_texts(scale, &weights, texts, OverflowMode::WrapFullRow)?;
        self.row(&row)
    }

    /// A single field spanning the whole line, wrapping as needed.
    pub fn text(&mut self, text: &str, style: TextStyle) -> Result<&mut Self, LayoutError> {
        let row = Row::new(style.scale).column(
            ColumnSpec::new(text)
                .bold(style.bold)
                .align(style.align)
                .overflow(OverflowMode::WrapFullRow),
        );
        self.row(&row)
    }

    /// A line of `-` exactly one line budget wide.
    pub fn divider(&mut self, scale: FontScale) -> &mut Self {
        self.job.append(text::font_scale(scale));
        self.job.append(vec![b'-'; self.budget(scale)]);
        self.job.append(commands::line_feed());
        self
    }

    pub fn blank_line(&mut self) -> &mut Self {
        self.job.append(commands::line_feed());
        self
    }

    // ========================================================================
    // Paper movement
    // ========================================================================

    pub fn line_spacing(&mut self, units: u8) -> &mut Self {
        self.job.append(commands::line_spacing(units));
        self
    }

    pub fn default_line_spacing(&mut self) -> &mut Self {
        self.job.append(commands::default_line_spacing());
        self
    }

    /// Feed `units` motion units.
    pub fn feed(&mut self, units: u8) -> &mut Self {
        self.job.append(commands::feed_units(units));
        self
    }

    pub fn feed_lines(&mut self, lines: u8) -> &mut Self {
        self.job.append(commands::feed_lines(lines));
        self
    }

    /// Cut at the current position.
    pub fn cut(&mut self, partial: bool) -> &mut Self {
        self.job.append(if partial {
            commands::cut_partial()
        } else {
            commands::cut_full()
        });
        self
    }

    /// Feed `units` past the cutter, then cut.
    pub fn feed_and_cut(&mut self, partial: bool, units: u8) -> &mut Self {
        self.job.append(commands::feed_and_cut(partial, units));
        self
    }

    // ========================================================================
    // Peripherals
    // ========================================================================

    pub fn open_cash_drawer(&mut self, pin: DrawerPin) -> &mut Self {
        self.job.append(commands::cash_drawer_pulse(pin, 1));
        self
    }

    pub fn beep(&mut self, times: u8, duration: u8) -> &mut Self {
        self.job.append(commands::buzzer(times, duration));
        self
    }

    // ========================================================================
    // Symbols and bitmaps
    // ========================================================================

    pub fn qr_code(&mut self, data: &[u8], module_size: u8, level: qr::QrErrorLevel) -> &mut Self {
        self.job.append(qr::generate(data, module_size, level));
        self.job.append(commands::line_feed());
        self
    }

    pub fn pdf417(&mut self, data: &[u8], module_width: u8, ecc_level: u8) -> &mut Self {
        self.job.append(pdf417::generate(data, module_width, ecc_level));
        self.job.append(commands::line_feed());
        self
    }

    pub fn code128(&mut self, data: &[u8], height: u8) -> &mut Self {
        self.job.append(barcode1d::code128(data, height));
        self.job.append(commands::line_feed());
        self
    }

    /// Pre-packed 1-bit raster data, `width_bytes` bytes per row.
    pub fn raster(&mut self, mode: RasterMode, width_bytes: u16, height: u16, data: &[u8]) -> &mut Self {
        self.job.append(graphics::raster(mode, width_bytes, height, data));
        self
    }

    /// Print a bitmap stored in the printer's flash.
    pub fn nv_bitmap(&mut self, n: u8, mode: RasterMode) -> &mut Self {
        self.job.append(graphics::nv_bitmap(n, mode));
        self
    }

    /// Append bytes verbatim.
    pub fn raw(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.job.append(bytes);
        self
    }

    /// Bytes queued so far.
    pub fn job(&self) -> &PrintJob {
        &self.job
    }

    /// Hand over the finished job.
    pub fn finish(self) -> PrintJob {
        self.job
    }
}

// ============================================================================
// TESTS
// ============================================================================
