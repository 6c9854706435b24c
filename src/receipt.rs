//! # Receipt Templates
//!
//! Pre-built tickets demonstrating the row/column layout engine.
//!
//! Every template takes the layout settings and the issue time, so the same
//! receipt can be printed on narrow or wide paper and in any codepage that
//! can encode its text. The `cjk` template needs a multi-byte codepage.

use chrono::NaiveDateTime;

use crate::error::LayoutError;
use crate::job::PrintJob;
use crate::layout::{Align, ColumnSpec, LayoutConfig, OverflowMode, Row};
use crate::printer::FontScale;
use crate::protocol::barcode::qr::QrErrorLevel;
use crate::ticket::{TextStyle, Ticket};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line item: name, quantity, unit price.
type Item<'a> = (&'a str, u32, f64);

const DEMO_ITEMS: &[Item<'static>] = &[
    ("Liminal Espresso", 1, 4.50),
    ("Basement Techno Vinyl", 1, 29.00),
    ("Thermal Paper (mystery roll, unlabeled)", 2, 7.25),
    ("Sticker", 4, 0.50),
];

const CJK_ITEMS: &[Item<'static>] = &[
    ("红烧牛肉面", 1, 28.00),
    ("凉拌黄瓜", 2, 12.00),
    ("酸梅汤（大杯，少冰）", 1, 9.50),
];

// ============================================================================
// RECEIPT TEMPLATES
// ============================================================================

/// Store header, an item table, totals and a footer.
///
/// The item column uses [`OverflowMode::WrapFullRow`], so long names continue
/// on the lines below.
pub fn demo_receipt(config: LayoutConfig, issued: NaiveDateTime) -> Result<PrintJob, LayoutError> {
    let mut ticket = Ticket::new(config);
    ticket.init();

    header(&mut ticket, "CHURRA MART", issued)?;
    item_table(&mut ticket, ("ITEM", "QTY", "CAD"), DEMO_ITEMS)?;
    totals(&mut ticket, DEMO_ITEMS, 0.13)?;

    ticket.blank_line();
    ticket.text("COME BACK SOON", TextStyle { bold: true, ..TextStyle::centered() })?;
    ticket.feed_and_cut(false, 80);
    Ok(ticket.finish())
}

/// The demo receipt plus symbols and a cash drawer pulse.
pub fn full_receipt(config: LayoutConfig, issued: NaiveDateTime) -> Result<PrintJob, LayoutError> {
    let mut ticket = Ticket::new(config);
    ticket.init();

    header(&mut ticket, "CHURRA MART", issued)?;
    item_table(&mut ticket, ("ITEM", "QTY", "CAD"), DEMO_ITEMS)?;
    totals(&mut ticket, DEMO_ITEMS, 0.13)?;

    let order = issued.format("%Y%m%d%H%M%S").to_string();
    ticket.blank_line();
    ticket.text("ORDER", TextStyle::centered())?;
    ticket.code128(order.as_bytes(), 80);
    ticket.qr_code(
        format!("https://example.com/order/{order}").as_bytes(),
        6,
        QrErrorLevel::M,
    );
    ticket.pdf417(order.as_bytes(), 3, 2);

    ticket.open_cash_drawer(Default::default());
    ticket.feed_and_cut(false, 80);
    Ok(ticket.finish())
}

/// One row per overflow mode, each with the same oversized text.
pub fn overflow_demo(config: LayoutConfig, issued: NaiveDateTime) -> Result<PrintJob, LayoutError> {
    const LONG: &str = "A column value that is much longer than its share of the line";

    let mut ticket = Ticket::new(config);
    ticket.init();
    header(&mut ticket, "OVERFLOW", issued)?;

    for (label, mode) in [
        ("none", OverflowMode::None),
        ("ellipsis", OverflowMode::Ellipsis),
        ("wrap_full_row", OverflowMode::WrapFullRow),
        ("wrap_within_column", OverflowMode::WrapWithinColumn),
    ] {
        ticket.text(label, TextStyle { bold: true, ..TextStyle::default() })?;
        let row = Row::new(FontScale::Normal)
            .column(ColumnSpec::new(LONG).weight(2.0).overflow(mode))
            .column(ColumnSpec::new("END").align(Align::Right));
        ticket.row(&row)?;
        ticket.divider(FontScale::Normal);
    }

    ticket.feed_and_cut(true, 80);
    Ok(ticket.finish())
}

/// A Chinese menu receipt. Needs GBK or GB18030.
pub fn cjk_receipt(config: LayoutConfig, issued: NaiveDateTime) -> Result<PrintJob, LayoutError> {
    let mut ticket = Ticket::new(config);
    ticket.init();

    header(&mut ticket, "小面馆", issued)?;
    item_table(&mut ticket, ("菜品", "数量", "金额"), CJK_ITEMS)?;
    totals(&mut ticket, CJK_ITEMS, 0.0)?;

    ticket.blank_line();
    ticket.text("谢谢惠顾，欢迎再次光临！", TextStyle::centered())?;
    ticket.feed_and_cut(false, 80);
    Ok(ticket.finish())
}

// ============================================================================
// SECTIONS
// ============================================================================

fn header(ticket: &mut Ticket, title: &str, issued: NaiveDateTime) -> Result<(), LayoutError> {
    ticket
        .text(title, TextStyle::title())?
        .text(&issued.format(TIMESTAMP_FORMAT).to_string(), TextStyle::centered())?
        .divider(FontScale::Normal);
    Ok(())
}

fn item_table(
    ticket: &mut Ticket,
    headings: (&str, &str, &str),
    items: &[Item<'_>],
) -> Result<(), LayoutError> {
    let row = |name: &str, qty: &str, price: &str, bold: bool| {
        Row::new(FontScale::Normal)
            .column(ColumnSpec::new(name).weight(3.0).bold(bold))
            .column(ColumnSpec::new(qty).align(Align::Center).bold(bold))
            .column(
                ColumnSpec::new(price)
                    .weight(1.5)
                    .align(Align::Right)
                    .bold(bold)
                    .overflow(OverflowMode::Ellipsis),
            )
    };

    ticket.row(&row(headings.0, headings.1, headings.2, true))?;
    for &(name, qty, price) in items {
        let amount = format!("{:.2}", qty as f64 * price);
        ticket.row(&row(name, &format!("x{qty}"), &amount, false))?;
    }
    ticket.divider(FontScale::Normal);
    Ok(())
}

fn totals(ticket: &mut Ticket, items: &[Item<'_>], tax_rate: f64) -> Result<(), LayoutError> {
    let subtotal: f64 = items.iter().map(|(_, qty, price)| *qty as f64 * price).sum();
    let tax = (subtotal * tax_rate * 100.0).round() / 100.0;

    let line = |label: &str, amount: f64, scale: FontScale, bold: bool| {
        Row::new(scale)
            .column(ColumnSpec::new(label).bold(bold))
            .column(
                ColumnSpec::new(format!("{amount:.2}"))
                    .align(Align::Right)
                    .bold(bold),
            )
    };

    if tax > 0.0 {
        ticket.row(&line("SUBTOTAL", subtotal, FontScale::Normal, false))?;
        ticket.row(&line(
            &format!("TAX ({:.0}%)", tax_rate * 100.0),
            tax,
            FontScale::Normal,
            false,
        ))?;
    }
    ticket.row(&line("TOTAL", subtotal + tax, FontScale::Double, true))?;
    Ok(())
}

// ============================================================================
// LOOKUP
// ============================================================================

type Template = fn(LayoutConfig, NaiveDateTime) -> Result<PrintJob, LayoutError>;

const TEMPLATES: &[(&str, Template)] = &[
    ("demo", demo_receipt),
    ("full", full_receipt),
    ("overflow", overflow_demo),
    ("cjk", cjk_receipt),
];

/// Names accepted by [`by_name`].
pub fn list_receipts() -> Vec<&'static str> {
    TEMPLATES.iter().map(|(name, _)| *name).collect()
}

pub fn is_receipt(name: &str) -> bool {
    TEMPLATES.iter().any(|(n, _)| *n == name)
}

/// Render the template called `name`, or `None` if there is no such template.
pub fn by_name(
    name: &str,
    config: LayoutConfig,
    issued: NaiveDateTime,
) -> Option<Result<PrintJob, LayoutError>> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, template)| template(config, issued))
}

// ============================================================================
// TESTS
// ============================================================================
