//! # Command Encoder
//!
//! Serializes physical lines into ESC/POS buffers.
//!
//! ## Per-line Sequence
//!
//! ```text
//! GS ! n                               font scale
//! [ESC E 1|0] [pad] text [pad]         per segment, emphasis only on change
//! [ESC E 0]                            last line only, if still emphasized
//! LF
//! ```

use super::model::Align;
use super::row::{PhysicalLine, Segment};
use crate::printer::FontScale;
use crate::protocol::{commands, text};

fn spaces(n: usize) -> Vec<u8> {
    vec![b' '; n]
}

/// Left and right padding for a segment. Center puts the odd byte on the
/// right. Text wider than its slot gets none.
fn padding(segment: &Segment) -> (usize, usize) {
    let pad = segment.alloc_width.saturating_sub(segment.bytes.len());
    match segment.align {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => (pad / 2, pad - pad / 2),
    }
}

/// Encode a row's physical lines.
///
/// Emphasis starts off and is switched off again before the row's final line
/// feed, so no style leaks into whatever follows. Blank segments print only
/// spaces and never switch emphasis.
pub fn encode(lines: &[PhysicalLine], font_scale: FontScale) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut bold = false;

    for (index, line) in lines.iter().enumerate() {
        out.push(text::font_scale(font_scale));

        for segment in &line.segments {
            if !segment.is_blank() && segment.bold != bold {
                bold = segment.bold;
                out.push(if bold {
                    text::emphasis_on()
                } else {
                    text::emphasis_off()
                });
            }

            let (left, right) = padding(segment);
            if left > 0 {
                out.push(spaces(left));
            }
            if !segment.bytes.is_empty() {
                out.push(segment.bytes.clone());
            }
            if right > 0 {
                out.push(spaces(right));
            }
        }

        // The next row starts from `bold = false` without emitting anything,
        // so the printer has to be back at normal weight when this row ends.
        if bold && index + 1 == lines.len() {
            out.push(text::emphasis_off());
        }
        out.push(commands::line_feed());
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seg(text: &str, width: usize, align: Align, bold: bool) -> Segment {
        Segment {
            column: 0,
            bytes: text.as_bytes().to_vec(),
            alloc_width: width,
            align,
            bold,
        }
    }

    fn line(segments: Vec<Segment>) -> PhysicalLine {
        PhysicalLine { segments }
    }

    const SCALE: [u8; 3] = [0x1D, 0x21, 0x00];

    #[test]
    fn test_padding() {
        assert_eq!(padding(&seg("ab", 6, Align::Left, false)), (0, 4));
        assert_eq!(padding(&seg("ab", 6, Align::Right, false)), (4, 0));
        assert_eq!(padding(&seg("ab", 5, Align::Center, false)), (1, 2));
        assert_eq!(padding(&seg("abcdef", 4, Align::Center, false)), (0, 0));
    }

    #[test]
    fn test_plain_line() {
        let out = encode(
            &[line(vec![
                seg("Tea", 5, Align::Left, false),
                seg("3", 3, Align::Right, false),
            ])],
            FontScale::Normal,
        );
        assert_eq!(
            out,
            vec![
                SCALE.to_vec(),
                b"Tea".to_vec(),
                b"  ".to_vec(),
                b"  ".to_vec(),
                b"3".to_vec(),
                vec![0x0A],
            ]
        );
    }

    #[test]
    fn test_bold_row_resets_before_final_feed() {
        let out = encode(
            &[
                line(vec![seg("A", 1, Align::Left, true)]),
                line(vec![seg("B", 1, Align::Left, true)]),
            ],
            FontScale::Double,
        );
        assert_eq!(
            out,
            vec![
                vec![0x1D, 0x21, 0x11],
                vec![0x1B, 0x45, 0x01],
                b"A".to_vec(),
                vec![0x0A],
                vec![0x1D, 0x21, 0x11],
                b"B".to_vec(),
                vec![0x1B, 0x45, 0x00],
                vec![0x0A],
            ]
        );
    }

    #[test]
    fn test_blank_segments_do_not_toggle_emphasis() {
        let out = encode(
            &[line(vec![
                seg("X", 2, Align::Left, true),
                seg("", 2, Align::Left, false),
                seg("Y", 2, Align::Left, true),
            ])],
            FontScale::Normal,
        );
        let on = out.iter().filter(|b| **b == text::emphasis_on()).count();
        let off = out.iter().filter(|b| **b == text::emphasis_off()).count();
        assert_eq!((on, off), (1, 1));
    }

    #[test]
    fn test_next_row_prints_at_normal_weight() {
        let mut stream = encode(&[line(vec![seg("TOTAL", 5, Align::Left, true)])], FontScale::Normal);
        stream.extend(encode(&[line(vec![seg("thanks", 6, Align::Left, false)])], FontScale::Normal));

        // Replay the emphasis state the printer would see
        let mut printer_bold = false;
        let mut weight_of_thanks = None;
        for buf in &stream {
            if *buf == text::emphasis_on() {
                printer_bold = true;
            } else if *buf == text::emphasis_off() {
                printer_bold = false;
            } else if buf.as_slice() == b"thanks" {
                weight_of_thanks = Some(printer_bold);
            }
        }
        assert_eq!(weight_of_thanks, Some(false));
    }

    #[test]
    fn test_empty_input() {
        assert!(encode(&[], FontScale::Normal).is_empty());
    }
}
