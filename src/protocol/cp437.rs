//! # Code Page 437
//!
//! Single-byte IBM PC character table, selected on ESC/POS printers with
//! `ESC t 0`. Every character costs exactly one byte, which makes it the
//! simplest codepage for layout: byte width equals character count.

/// Encode one character, or `None` if CP437 has no glyph for it.
///
/// ASCII (U+0000–U+007F) maps to itself.
pub fn encode_char(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        Some(ch as u8)
    } else {
        upper_half(ch)
    }
}

/// Upper half of the table (0x80–0xFF).
#[rustfmt::skip]
fn upper_half(ch: char) -> Option<u8> {
    let byte = match ch {
        // 0x80: accented letters
        'Ç' => 0x80, 'ü' => 0x81, 'é' => 0x82, 'â' => 0x83,
        'ä' => 0x84, 'à' => 0x85, 'å' => 0x86, 'ç' => 0x87,
        'ê' => 0x88, 'ë' => 0x89, 'è' => 0x8A, 'ï' => 0x8B,
        'î' => 0x8C, 'ì' => 0x8D, 'Ä' => 0x8E, 'Å' => 0x8F,
        // 0x90: accented letters, currency
        'É' => 0x90, 'æ' => 0x91, 'Æ' => 0x92, 'ô' => 0x93,
        'ö' => 0x94, 'ò' => 0x95, 'û' => 0x96, 'ù' => 0x97,
        'ÿ' => 0x98, 'Ö' => 0x99, 'Ü' => 0x9A, '¢' => 0x9B,
        '£' => 0x9C, '¥' => 0x9D, '₧' => 0x9E, 'ƒ' => 0x9F,
        // 0xA0: Spanish letters, fractions, guillemets
        'á' => 0xA0, 'í' => 0xA1, 'ó' => 0xA2, 'ú' => 0xA3,
        'ñ' => 0xA4, 'Ñ' => 0xA5, 'ª' => 0xA6, 'º' => 0xA7,
        '¿' => 0xA8, '⌐' => 0xA9, '¬' => 0xAA, '½' => 0xAB,
        '¼' => 0xAC, '¡' => 0xAD, '«' => 0xAE, '»' => 0xAF,
        // 0xB0: shades and box drawing
        '░' => 0xB0, '▒' => 0xB1, '▓' => 0xB2, '│' => 0xB3,
        '┤' => 0xB4, '╡' => 0xB5, '╢' => 0xB6, '╖' => 0xB7,
        '╕' => 0xB8, '╣' => 0xB9, '║' => 0xBA, '╗' => 0xBB,
        '╝' => 0xBC, '╜' => 0xBD, '╛' => 0xBE, '┐' => 0xBF,
        // 0xC0: box drawing
        '└' => 0xC0, '┴' => 0xC1, '┬' => 0xC2, '├' => 0xC3,
        '─' => 0xC4, '┼' => 0xC5, '╞' => 0xC6, '╟' => 0xC7,
        '╚' => 0xC8, '╔' => 0xC9, '╩' => 0xCA, '╦' => 0xCB,
        '╠' => 0xCC, '═' => 0xCD, '╬' => 0xCE, '╧' => 0xCF,
        // 0xD0: box drawing and blocks
        '╨' => 0xD0, '╤' => 0xD1, '╥' => 0xD2, '╙' => 0xD3,
        '╘' => 0xD4, '╒' => 0xD5, '╓' => 0xD6, '╫' => 0xD7,
        '╪' => 0xD8, '┘' => 0xD9, '┌' => 0xDA, '█' => 0xDB,
        '▄' => 0xDC, '▌' => 0xDD, '▐' => 0xDE, '▀' => 0xDF,
        // 0xE0: Greek and math
        'α' => 0xE0, 'ß' => 0xE1, 'Γ' => 0xE2, 'π' => 0xE3,
        'Σ' => 0xE4, 'σ' => 0xE5, 'µ' => 0xE6, 'τ' => 0xE7,
        'Φ' => 0xE8, 'Θ' => 0xE9, 'Ω' => 0xEA, 'δ' => 0xEB,
        '∞' => 0xEC, 'φ' => 0xED, 'ε' => 0xEE, '∩' => 0xEF,
        // 0xF0: math, degree, nbsp
        '≡' => 0xF0, '±' => 0xF1, '≥' => 0xF2, '≤' => 0xF3,
        '⌠' => 0xF4, '⌡' => 0xF5, '÷' => 0xF6, '≈' => 0xF7,
        '°' => 0xF8, '∙' => 0xF9, '·' => 0xFA, '√' => 0xFB,
        'ⁿ' => 0xFC, '²' => 0xFD, '■' => 0xFE, '\u{00A0}' => 0xFF,
        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode_char('A'), Some(b'A'));
        assert_eq!(encode_char(' '), Some(0x20));
        assert_eq!(encode_char('~'), Some(0x7E));
    }

    #[test]
    fn test_accented_latin() {
        assert_eq!(encode_char('ñ'), Some(0xA4));
        assert_eq!(encode_char('é'), Some(0x82));
        assert_eq!(encode_char('Ü'), Some(0x9A));
    }

    #[test]
    fn test_box_drawing() {
        assert_eq!(encode_char('┌'), Some(0xDA));
        assert_eq!(encode_char('═'), Some(0xCD));
        assert_eq!(encode_char('█'), Some(0xDB));
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(encode_char('★'), None);
        assert_eq!(encode_char('中'), None);
        assert_eq!(encode_char('€'), None);
    }
}
