//! # Columna - Receipt Layout for ESC/POS Printers
//!
//! Columna lays out receipt rows as weighted columns and serializes them to
//! ESC/POS byte streams for 58mm and 80mm thermal printers. It provides:
//!
//! - **Layout engine**: column widths from weights, per-column overflow
//!   (ellipsis, wrapping), alignment and emphasis
//! - **Codepages**: GBK, GB18030, Big5, Shift_JIS, EUC-KR and CP437 widths
//! - **Protocol implementation**: ESC/POS command builders
//! - **Transport**: TCP, Bluetooth RFCOMM and USB byte channels
//!
//! ## Quick Start
//!
//! ```no_run
//! use columna::{
//!     layout::{Align, ColumnSpec, LayoutConfig, Row},
//!     printer::{FontScale, PaperSpec},
//!     protocol::Codepage,
//!     ticket::{TextStyle, Ticket},
//!     transport::{ByteChannel, TcpChannel, send_job},
//! };
//!
//! let config = LayoutConfig::new(PaperSpec::Narrow).with_codepage(Codepage::Gbk);
//!
//! let mut ticket = Ticket::new(config);
//! ticket.init();
//! ticket.text("小面馆", TextStyle::title())?;
//! ticket.row(
//!     &Row::new(FontScale::Normal)
//!         .column(ColumnSpec::new("牛肉面").weight(2.0))
//!         .column(ColumnSpec::new("x1").align(Align::Center))
//!         .column(ColumnSpec::new("18.00").align(Align::Right)),
//! )?;
//! ticket.feed_and_cut(false, 80);
//! let job = ticket.finish();
//!
//! let mut printer = TcpChannel::new("192.168.1.50", 9100);
//! printer.open()?;
//! send_job(&mut printer, &job)?;
//! printer.close()?;
//!
//! # Ok::<(), columna::ColumnaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Row/column layout engine |
//! | [`ticket`] | Ticket builder on top of the layout engine |
//! | [`document`] | JSON ticket documents |
//! | [`receipt`] | Demo receipt templates |
//! | [`protocol`] | ESC/POS command builders and codepages |
//! | [`transport`] | Byte channels to printers |
//! | [`printer`] | Paper widths and line budgets |
//! | [`job`] | Ordered byte buffers for one print job |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod job;
pub mod layout;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod ticket;
pub mod transport;

// Re-exports for convenience
pub use error::{ColumnaError, ConfigError, LayoutError, TransportError};
pub use job::PrintJob;
pub use layout::{LayoutConfig, render_row};
pub use printer::{FontScale, PaperSpec};
pub use protocol::Codepage;
pub use ticket::Ticket;
