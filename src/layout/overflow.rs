//! # Overflow Resolution
//!
//! Decides what happens to one column's text given its byte allocation.
//!
//! | Mode | Result |
//! |------|--------|
//! | `Ellipsis` | One span, prefix + `...`, never wider than the allocation |
//! | `WrapFullRow` | Whole text re-split on dedicated lines below the row |
//! | `WrapWithinColumn` | One piece per physical line, same slot |
//! | `None` | Text as-is, may exceed the allocation |
//!
//! Text that fits is returned unchanged whatever the mode.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::measure::{self, Unencodable};
use super::model::OverflowMode;
use crate::protocol::codepage::Codepage;

const MARKER: &str = "...";

/// How many characters survive before the `...` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipsisRule {
    /// Keep `floor(alloc / 2) - 2` characters, assuming every character may
    /// be two bytes wide.
    #[default]
    WorstCaseDoubleByte,
    /// Keep the longest prefix that fits next to the marker.
    Measured,
}

/// What the resolver did to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowKind {
    Fits,
    TruncatedEllipsis,
    WrappedFullRow,
    WrappedWithinColumn,
    /// `None` mode text wider than its slot.
    Overflowing,
}

/// Encoded text for one physical line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub bytes: Vec<u8>,
    pub width: usize,
}

impl Span {
    fn encode(text: &str, width: usize, codepage: Codepage) -> Result<Self, Unencodable> {
        Ok(Self {
            bytes: measure::encode(text, codepage)?,
            width,
        })
    }
}

/// Outcome of [`resolve`].
///
/// For [`OverflowKind::WrappedFullRow`] every span is a dedicated line and
/// the column's slot on the main line stays blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: OverflowKind,
    pub lines: Vec<Span>,
}

/// Resolve one column.
///
/// `alloc` is the column's own width; `span` is the width full-row wraps are
/// split against (the whole line budget unless trailing columns are reserved).
pub fn resolve(
    text: &str,
    alloc: usize,
    span: usize,
    mode: OverflowMode,
    codepage: Codepage,
    ellipsis: EllipsisRule,
) -> Result<Resolution, Unencodable> {
    // Measures the whole text up front so errors carry the right char index
    let width = measure::width_bytes(text, codepage)?;

    if width <= alloc {
        return Ok(Resolution {
            kind: OverflowKind::Fits,
            lines: vec![Span::encode(text, width, codepage)?],
        });
    }

    match mode {
        OverflowMode::None => {
            debug!(width, alloc, "column text overflows its slot");
            Ok(Resolution {
                kind: OverflowKind::Overflowing,
                lines: vec![Span::encode(text, width, codepage)?],
            })
        }
        OverflowMode::Ellipsis => Ok(Resolution {
            kind: OverflowKind::TruncatedEllipsis,
            lines: vec![ellipsize(text, alloc, codepage, ellipsis)?],
        }),
        OverflowMode::WrapWithinColumn => {
            let lines = measure::split_by_width(text, codepage, alloc)?
                .into_iter()
                .map(|p| Span::encode(p.text, p.width, codepage))
                .collect::<Result<_, _>>()?;
            Ok(Resolution {
                kind: OverflowKind::WrappedWithinColumn,
                lines,
            })
        }
        OverflowMode::WrapFullRow => {
            let lines = measure::split_by_width(text, codepage, span)?
                .into_iter()
                .map(|p| Span::encode(p.text, p.width, codepage))
                .collect::<Result<_, _>>()?;
            Ok(Resolution {
                kind: OverflowKind::WrappedFullRow,
                lines,
            })
        }
    }
}

fn ellipsize(
    text: &str,
    alloc: usize,
    codepage: Codepage,
    rule: EllipsisRule,
) -> Result<Span, Unencodable> {
    // (end offset, width) per character
    let mut cells = Vec::new();
    for (i, (offset, ch)) in text.char_indices().enumerate() {
        cells.push((offset + ch.len_utf8(), measure::char_width(ch, i, codepage)?));
    }
    let prefix_width = |n: usize| cells[..n].iter().map(|(_, w)| w).sum::<usize>();

    let mut keep = match rule {
        EllipsisRule::WorstCaseDoubleByte => (alloc / 2).saturating_sub(2).min(cells.len()),
        EllipsisRule::Measured => {
            let room = alloc.saturating_sub(MARKER.len());
            let mut used = 0;
            cells
                .iter()
                .take_while(|(_, w)| {
                    used += w;
                    used <= room
                })
                .count()
        }
    };

    while keep > 0 && prefix_width(keep) + MARKER.len() > alloc {
        keep -= 1;
    }

    let kept_width = prefix_width(keep);
    // With no prefix left the marker itself shrinks to fit
    let dots = MARKER.len().min(alloc - kept_width);
    let end = if keep == 0 { 0 } else { cells[keep - 1].0 };

    let mut span = Span::encode(&text[..end], kept_width, codepage)?;
    span.bytes.extend(&MARKER.as_bytes()[..dots]);
    span.width += dots;
    Ok(span)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GBK: Codepage = Codepage::Gbk;

    fn run(text: &str, alloc: usize, span: usize, mode: OverflowMode) -> Resolution {
        resolve(text, alloc, span, mode, GBK, EllipsisRule::default()).unwrap()
    }

    fn texts(res: &Resolution) -> Vec<String> {
        res.lines
            .iter()
            .map(|s| {
                let (decoded, _, _) = encoding_rs::GBK.decode(&s.bytes);
                decoded.into_owned()
            })
            .collect()
    }

    #[test]
    fn test_fits_in_every_mode() {
        for mode in [
            OverflowMode::None,
            OverflowMode::Ellipsis,
            OverflowMode::WrapFullRow,
            OverflowMode::WrapWithinColumn,
        ] {
            let res = run("小计", 4, 4, mode);
            assert_eq!(res.kind, OverflowKind::Fits);
            assert_eq!(texts(&res), vec!["小计"]);
        }
    }

    #[test]
    fn test_none_overflows() {
        let res = run("abcdef", 4, 4, OverflowMode::None);
        assert_eq!(res.kind, OverflowKind::Overflowing);
        assert_eq!(res.lines[0].width, 6);
    }

    // ========================================================================
    // Ellipsis
    // ========================================================================

    #[test]
    fn test_ellipsis_worst_case_formula() {
        // floor(12 / 2) - 2 = 4 characters
        let res = run("abcdefghijklmnop", 12, 12, OverflowMode::Ellipsis);
        assert_eq!(res.kind, OverflowKind::TruncatedEllipsis);
        assert_eq!(texts(&res), vec!["abcd..."]);
        assert_eq!(res.lines[0].width, 7);
    }

    #[test]
    fn test_ellipsis_cjk() {
        let text = "一二三四五六七八九十";
        let res = run(text, 12, 12, OverflowMode::Ellipsis);
        assert_eq!(texts(&res), vec!["一二三四..."]);
        assert_eq!(res.lines[0].width, 11);
    }

    #[test]
    fn test_ellipsis_measured() {
        let res = resolve(
            "abcdefghijklmnop",
            12,
            12,
            OverflowMode::Ellipsis,
            GBK,
            EllipsisRule::Measured,
        )
        .unwrap();
        assert_eq!(texts(&res), vec!["abcdefghi..."]);
    }

    #[test]
    fn test_ellipsis_tiny_allocation() {
        assert_eq!(texts(&run("abcdef", 2, 2, OverflowMode::Ellipsis)), vec![".."]);
        assert_eq!(texts(&run("abcdef", 0, 0, OverflowMode::Ellipsis)), vec![""]);
        assert_eq!(texts(&run("中文字", 5, 5, OverflowMode::Ellipsis)), vec!["..."]);
    }

    #[test]
    fn test_ellipsis_drops_wide_characters_to_fit() {
        // 4-byte GB18030 characters: floor(14/2) - 2 = 5 chars would be 20 bytes
        let res = resolve(
            "😀😀😀😀😀😀",
            14,
            14,
            OverflowMode::Ellipsis,
            Codepage::Gb18030,
            EllipsisRule::WorstCaseDoubleByte,
        )
        .unwrap();
        assert_eq!(res.lines[0].width, 11);
        assert!(res.lines[0].bytes.ends_with(b"..."));
    }

    // ========================================================================
    // Wrapping
    // ========================================================================

    #[test]
    fn test_wrap_within_column() {
        let res = run("一二三四五六七", 6, 48, OverflowMode::WrapWithinColumn);
        assert_eq!(res.kind, OverflowKind::WrappedWithinColumn);
        assert_eq!(texts(&res), vec!["一二三", "四五六", "七"]);
    }

    #[test]
    fn test_wrap_full_row_splits_whole_text() {
        let res = run("abcdefghijkl", 4, 6, OverflowMode::WrapFullRow);
        assert_eq!(res.kind, OverflowKind::WrappedFullRow);
        assert_eq!(texts(&res), vec!["abcdef", "ghijkl"]);
    }

    #[test]
    fn test_wrap_full_row_fits_line_budget_in_one_piece() {
        let text = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMN";
        let res = run(text, 24, 48, OverflowMode::WrapFullRow);
        assert_eq!(res.kind, OverflowKind::WrappedFullRow);
        assert_eq!(texts(&res), vec![text]);
        assert_eq!(res.lines[0].width, 40);
    }

    #[test]
    fn test_wrap_full_row_wider_than_column() {
        let res = run("中文", 1, 4, OverflowMode::WrapFullRow);
        assert_eq!(texts(&res), vec!["中文"]);
    }

    #[test]
    fn test_unencodable_reports_index() {
        let err = resolve(
            "abc🍜",
            2,
            2,
            OverflowMode::Ellipsis,
            GBK,
            EllipsisRule::default(),
        )
        .unwrap_err();
        assert_eq!(err.char_index, 3);
        assert_eq!(err.ch, '🍜');
    }
}
