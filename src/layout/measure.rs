//! # Text Measurement
//!
//! Widths are counted in encoded bytes, which is what the printer counts: in
//! GBK an ASCII letter takes one cell and a CJK ideograph takes two. Splits
//! always fall on character boundaries so a multi-byte sequence is never cut.

use tracing::warn;

use crate::protocol::codepage::Codepage;

/// A character with no representation in the target codepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unencodable {
    pub ch: char,
    /// Position of the character in the input, counted in chars.
    pub char_index: usize,
    pub codepage: Codepage,
}

/// One slice of text produced by [`split_by_width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'a> {
    pub text: &'a str,
    /// Encoded width in bytes.
    pub width: usize,
    /// A single character wider than the requested bound.
    pub oversized: bool,
}

/// Width of one character, reporting `char_index` if it is unrepresentable.
pub(crate) fn char_width(
    ch: char,
    char_index: usize,
    codepage: Codepage,
) -> Result<usize, Unencodable> {
    codepage.char_width(ch).ok_or(Unencodable {
        ch,
        char_index,
        codepage,
    })
}

/// Encoded width of `text` in bytes.
///
/// ```
/// use columna::layout::measure::width_bytes;
/// use columna::protocol::Codepage;
///
/// assert_eq!(width_bytes("Tea 奶茶", Codepage::Gbk).unwrap(), 8);
/// ```
pub fn width_bytes(text: &str, codepage: Codepage) -> Result<usize, Unencodable> {
    text.chars()
        .enumerate()
        .try_fold(0, |acc, (i, ch)| Ok(acc + char_width(ch, i, codepage)?))
}

/// Encode `text` for the printer.
pub fn encode(text: &str, codepage: Codepage) -> Result<Vec<u8>, Unencodable> {
    let mut out = Vec::with_capacity(text.len());
    for (char_index, ch) in text.chars().enumerate() {
        if codepage.encode_char(ch, &mut out).is_none() {
            return Err(Unencodable {
                ch,
                char_index,
                codepage,
            });
        }
    }
    Ok(out)
}

/// Greedy left-to-right split into pieces of at most `max_bytes`.
///
/// Concatenating the pieces yields `text` again. A character wider than
/// `max_bytes` on its own becomes a single oversized piece rather than being
/// dropped, so `max_bytes == 0` still terminates.
///
/// ```
/// use columna::layout::measure::split_by_width;
/// use columna::protocol::Codepage;
///
/// let pieces = split_by_width("ab中文", Codepage::Gbk, 3).unwrap();
/// let texts: Vec<_> = pieces.iter().map(|p| p.text).collect();
/// assert_eq!(texts, ["ab", "中", "文"]);
/// ```
pub fn split_by_width(
    text: &str,
    codepage: Codepage,
    max_bytes: usize,
) -> Result<Vec<Piece<'_>>, Unencodable> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut width = 0;

    for (char_index, (offset, ch)) in text.char_indices().enumerate() {
        let w = char_width(ch, char_index, codepage)?;

        if width + w > max_bytes && offset > start {
            pieces.push(Piece {
                text: &text[start..offset],
                width,
                oversized: false,
            });
            start = offset;
            width = 0;
        }

        if w > max_bytes {
            // Nothing can precede it on this piece; emit it alone.
            let end = offset + ch.len_utf8();
            warn!(ch = ?ch, width = w, max_bytes, "character wider than column");
            pieces.push(Piece {
                text: &text[offset..end],
                width: w,
                oversized: true,
            });
            start = end;
            width = 0;
            continue;
        }

        width += w;
    }

    if start < text.len() {
        pieces.push(Piece {
            text: &text[start..],
            width,
            oversized: false,
        });
    }

    Ok(pieces)
}

// ============================================================================
// TESTS
// ============================================================================
