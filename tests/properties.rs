//! # Layout Properties
//!
//! Randomized checks over rows mixing ASCII and double-byte text:
//!
//! - column widths always add up to the line budget
//! - every physical line spans exactly the line budget
//! - no multi-byte character is ever split between lines
//! - only a lone character wider than its bound may exceed it, and is flagged
//! - wrapping never loses or reorders text
//! - emphasis switched on is always switched off again
//! - the same row always produces the same bytes

use columna::layout::{
    Align, ColumnSpec, EllipsisRule, LayoutConfig, OverflowMode, PhysicalLine, Row, RowBuilder,
    TrailingColumns, encoder, measure, planner,
};
use columna::printer::line_budget;
use columna::protocol::text;
use columna::{Codepage, FontScale, PaperSpec};
use proptest::prelude::*;

const CHARS: &[char] = &[
    'a', 'Z', '0', '7', ' ', '.', '-', '商', '品', '名', '称', '牛', '肉', '面', '，',
];

fn gbk(text: &str) -> Vec<u8> {
    encoding_rs::GBK.encode(text).0.into_owned()
}

/// One, two and four byte characters under GB18030.
const WIDE_CHARS: &[char] = &['a', '7', ' ', '商', '，', '😀', '🍜'];

/// Text the GBK codepage can always encode.
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(CHARS), 0..80).prop_map(String::from_iter)
}

fn arb_mode() -> impl Strategy<Value = OverflowMode> {
    prop::sample::select(vec![
        OverflowMode::None,
        OverflowMode::Ellipsis,
        OverflowMode::WrapFullRow,
        OverflowMode::WrapWithinColumn,
    ])
}

fn arb_column() -> impl Strategy<Value = ColumnSpec> {
    (
        arb_text(),
        0.1f64..10.0,
        any::<bool>(),
        prop::sample::select(vec![Align::Left, Align::Center, Align::Right]),
        arb_mode(),
    )
        .prop_map(|(text, weight, bold, align, mode)| {
            ColumnSpec::new(text)
                .weight(weight)
                .bold(bold)
                .align(align)
                .overflow(mode)
        })
}

fn arb_row() -> impl Strategy<Value = Row> {
    (
        prop::sample::select(vec![FontScale::Normal, FontScale::Double]),
        prop::collection::vec(arb_column(), 1..5),
    )
        .prop_map(|(scale, columns)| columns.into_iter().fold(Row::new(scale), Row::column))
}

fn arb_config() -> impl Strategy<Value = LayoutConfig> {
    (
        prop::sample::select(vec![PaperSpec::Narrow, PaperSpec::Wide]),
        prop::sample::select(vec![TrailingColumns::Omit, TrailingColumns::Reserve]),
        prop::sample::select(vec![EllipsisRule::WorstCaseDoubleByte, EllipsisRule::Measured]),
    )
        .prop_map(|(paper, trailing, ellipsis)| {
            LayoutConfig::new(paper)
                .with_codepage(Codepage::Gbk)
                .with_trailing_columns(trailing)
                .with_ellipsis(ellipsis)
        })
}

/// Text bytes of `column` in line order.
fn column_bytes(lines: &[PhysicalLine], column: usize) -> Vec<u8> {
    lines
        .iter()
        .flat_map(|line| line.segments.iter())
        .filter(|s| s.column == column)
        .flat_map(|s| s.bytes.iter().copied())
        .collect()
}

proptest! {
    #[test]
    fn prop_allocation_fills_budget(
        weights in prop::collection::vec(0.01f64..100.0, 1..8),
        budget in 0usize..64,
    ) {
        let widths = planner::allocate(&weights, budget).unwrap();
        prop_assert_eq!(widths.len(), weights.len());
        prop_assert_eq!(widths.iter().sum::<usize>(), budget);
    }

    #[test]
    fn prop_lines_span_budget(row in arb_row(), config in arb_config()) {
        let budget = line_budget(config.paper, row.font_scale);
        let lines = RowBuilder::new(&config).build(&row).unwrap();
        prop_assert!(!lines.is_empty());
        for line in &lines {
            prop_assert_eq!(line.alloc_width(), budget);
        }
    }

    #[test]
    fn prop_segments_hold_whole_characters(row in arb_row(), config in arb_config()) {
        let lines = RowBuilder::new(&config).build(&row).unwrap();
        for segment in lines.iter().flat_map(|l| l.segments.iter()) {
            let (decoded, had_errors) =
                encoding_rs::GBK.decode_without_bom_handling(&segment.bytes);
            prop_assert!(!had_errors, "split character in {:?}", segment.bytes);

            // Only unconstrained columns and lone oversized characters may
            // exceed their slot
            if row.columns[segment.column].overflow != OverflowMode::None {
                prop_assert!(
                    segment.bytes.len() <= segment.alloc_width || decoded.chars().count() == 1,
                    "{} bytes in a {}-byte slot",
                    segment.bytes.len(),
                    segment.alloc_width
                );
            }
        }
    }

    #[test]
    fn prop_split_flags_oversized_pieces(
        text in prop::collection::vec(prop::sample::select(WIDE_CHARS), 0..40)
            .prop_map(String::from_iter),
        max_bytes in 0usize..6,
    ) {
        let pieces = measure::split_by_width(&text, Codepage::Gb18030, max_bytes).unwrap();
        prop_assert_eq!(pieces.iter().map(|p| p.text).collect::<String>(), text.as_str());
        for p in &pieces {
            prop_assert!(!p.text.is_empty());
            if p.width > max_bytes {
                prop_assert!(p.oversized, "{:?} exceeds {} unflagged", p.text, max_bytes);
                prop_assert_eq!(p.text.chars().count(), 1);
            } else {
                prop_assert!(!p.oversized, "{:?} flagged but fits {}", p.text, max_bytes);
            }
        }
    }

    #[test]
    fn prop_wrapping_keeps_all_text(row in arb_row(), config in arb_config()) {
        let lines = RowBuilder::new(&config).build(&row).unwrap();
        for (i, column) in row.columns.iter().enumerate() {
            if matches!(
                column.overflow,
                OverflowMode::WrapFullRow | OverflowMode::WrapWithinColumn
            ) {
                prop_assert_eq!(column_bytes(&lines, i), gbk(&column.text));
            }
        }
    }

    #[test]
    fn prop_emphasis_balanced(row in arb_row(), config in arb_config()) {
        let lines = RowBuilder::new(&config).build(&row).unwrap();
        let buffers = encoder::encode(&lines, row.font_scale);
        let on = buffers.iter().filter(|b| **b == text::emphasis_on()).count();
        let off = buffers.iter().filter(|b| **b == text::emphasis_off()).count();
        prop_assert_eq!(on, off);
        prop_assert_eq!(buffers.last(), Some(&vec![b'\n']));
    }

    #[test]
    fn prop_layout_is_deterministic(row in arb_row(), config in arb_config()) {
        let first = RowBuilder::new(&config).build(&row).unwrap();
        let second = RowBuilder::new(&config).build(&row).unwrap();
        prop_assert_eq!(
            encoder::encode(&first, row.font_scale),
            encoder::encode(&second, row.font_scale)
        );
    }
}
