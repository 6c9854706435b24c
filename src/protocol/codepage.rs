//! # Codepage Table
//!
//! Maps a codepage name to the byte encoder used for both measuring and
//! emitting text. Receipt printers sold for the Chinese market default to GBK,
//! where CJK characters take two bytes and ASCII takes one.
//!
//! | Codepage | Bytes per char | Printer mode |
//! |----------|----------------|--------------|
//! | GBK (default) | 1–2 | FS & |
//! | GB18030 | 1, 2 or 4 | FS & |
//! | Big5 | 1–2 | FS & |
//! | Shift_JIS | 1–2 | FS & |
//! | EUC-KR | 1–2 | FS & |
//! | CP437 | 1 | FS . + ESC t 0 |
//!
//! ## Process Default
//!
//! A process-wide default codepage is read when a
//! [`LayoutConfig`](crate::layout::LayoutConfig) is created with `Default`.
//! Set it once at startup with [`set_default_codepage`]; layout itself only
//! ever uses the codepage stored in its config.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use encoding_rs::{BIG5, EUC_KR, Encoding, GB18030, GBK, SHIFT_JIS};
use serde::{Deserialize, Serialize};

use super::{cp437, text};
use crate::error::ConfigError;

/// A printer character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum Codepage {
    Gbk = 0,
    Gb18030 = 1,
    Big5 = 2,
    ShiftJis = 3,
    EucKr = 4,
    Cp437 = 5,
}

static DEFAULT_CODEPAGE: AtomicU8 = AtomicU8::new(Codepage::Gbk as u8);

/// Set the process-wide default codepage.
///
/// Call during startup, before building tickets.
pub fn set_default_codepage(codepage: Codepage) {
    DEFAULT_CODEPAGE.store(codepage as u8, Ordering::Release);
}

/// Current process-wide default codepage (GBK unless changed).
pub fn default_codepage() -> Codepage {
    Codepage::from_repr(DEFAULT_CODEPAGE.load(Ordering::Acquire)).unwrap_or(Codepage::Gbk)
}

impl Codepage {
    /// Every supported codepage, in table order.
    pub const ALL: [Codepage; 6] = [
        Codepage::Gbk,
        Codepage::Gb18030,
        Codepage::Big5,
        Codepage::ShiftJis,
        Codepage::EucKr,
        Codepage::Cp437,
    ];

    fn from_repr(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|cp| *cp as u8 == value)
    }

    /// Look up a codepage by name. Case-insensitive; `-` and `_` are
    /// interchangeable.
    ///
    /// ```
    /// use columna::protocol::codepage::Codepage;
    ///
    /// assert_eq!(Codepage::from_name("cp936").unwrap(), Codepage::Gbk);
    /// assert_eq!(Codepage::from_name("Shift-JIS").unwrap(), Codepage::ShiftJis);
    /// assert!(Codepage::from_name("koi8-r").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let key = name.trim().to_lowercase().replace('-', "_");
        match key.as_str() {
            "gbk" | "cp936" | "gb2312" => Ok(Self::Gbk),
            "gb18030" => Ok(Self::Gb18030),
            "big5" | "cp950" => Ok(Self::Big5),
            "shift_jis" | "sjis" | "cp932" => Ok(Self::ShiftJis),
            "euc_kr" | "cp949" => Ok(Self::EucKr),
            "cp437" | "ibm437" | "pc437" => Ok(Self::Cp437),
            _ => Err(ConfigError::UnsupportedCodepage(name.to_string())),
        }
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gbk => "GBK",
            Self::Gb18030 => "GB18030",
            Self::Big5 => "Big5",
            Self::ShiftJis => "Shift_JIS",
            Self::EucKr => "EUC-KR",
            Self::Cp437 => "CP437",
        }
    }

    /// Whether characters may take more than one byte.
    pub fn is_multibyte(&self) -> bool {
        !matches!(self, Self::Cp437)
    }

    /// Commands that switch the printer into this codepage's character mode.
    pub fn select_command(&self) -> Vec<u8> {
        if self.is_multibyte() {
            text::chinese_mode_on()
        } else {
            let mut out = text::chinese_mode_off();
            out.extend(text::character_table(0));
            out
        }
    }

    fn encoding(&self) -> Option<&'static Encoding> {
        match self {
            Self::Gbk => Some(GBK),
            Self::Gb18030 => Some(GB18030),
            Self::Big5 => Some(BIG5),
            Self::ShiftJis => Some(SHIFT_JIS),
            Self::EucKr => Some(EUC_KR),
            Self::Cp437 => None,
        }
    }

    /// Append the encoded bytes of `ch` to `out`.
    ///
    /// Returns the number of bytes written, or `None` (leaving `out`
    /// untouched) when the codepage cannot represent the character.
    pub fn encode_char(&self, ch: char, out: &mut Vec<u8>) -> Option<usize> {
        if ch.is_ascii() {
            out.push(ch as u8);
            return Some(1);
        }
        match self.encoding() {
            Some(encoding) => {
                let mut buf = [0u8; 4];
                let (bytes, _, had_errors) = encoding.encode(ch.encode_utf8(&mut buf));
                if had_errors {
                    return None;
                }
                out.extend_from_slice(&bytes);
                Some(bytes.len())
            }
            None => {
                let byte = cp437::encode_char(ch)?;
                out.push(byte);
                Some(1)
            }
        }
    }

    /// Encoded width of a single character, or `None` if unrepresentable.
    pub fn char_width(&self, ch: char) -> Option<usize> {
        if ch.is_ascii() {
            return Some(1);
        }
        let mut scratch = Vec::with_capacity(4);
        self.encode_char(ch, &mut scratch)
    }
}

impl Default for Codepage {
    fn default() -> Self {
        default_codepage()
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Codepage {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<Codepage> for String {
    fn from(value: Codepage) -> Self {
        value.name().to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(cp: Codepage, ch: char) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        cp.encode_char(ch, &mut out).map(|_| out)
    }

    #[test]
    fn test_gbk_widths() {
        assert_eq!(Codepage::Gbk.char_width('a'), Some(1));
        assert_eq!(Codepage::Gbk.char_width('商'), Some(2));
        assert_eq!(Codepage::Gbk.char_width('，'), Some(2));
    }

    #[test]
    fn test_gbk_bytes() {
        // 中 = D6 D0 in GBK
        assert_eq!(encoded(Codepage::Gbk, '中'), Some(vec![0xD6, 0xD0]));
    }

    #[test]
    fn test_gbk_rejects_emoji() {
        let mut out = vec![0x41];
        assert_eq!(Codepage::Gbk.encode_char('😀', &mut out), None);
        assert_eq!(out, vec![0x41]);
    }

    #[test]
    fn test_gb18030_four_byte() {
        assert_eq!(Codepage::Gb18030.char_width('😀'), Some(4));
    }

    #[test]
    fn test_cp437() {
        assert_eq!(encoded(Codepage::Cp437, 'é'), Some(vec![0x82]));
        assert_eq!(Codepage::Cp437.char_width('中'), None);
    }

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(Codepage::from_name("GBK"), Ok(Codepage::Gbk));
        assert_eq!(Codepage::from_name("gb2312"), Ok(Codepage::Gbk));
        assert_eq!(Codepage::from_name("BIG5"), Ok(Codepage::Big5));
        assert_eq!(Codepage::from_name("euc-kr"), Ok(Codepage::EucKr));
        assert_eq!(Codepage::from_name("IBM437"), Ok(Codepage::Cp437));
        assert_eq!(
            Codepage::from_name("latin1"),
            Err(ConfigError::UnsupportedCodepage("latin1".into()))
        );
    }

    #[test]
    fn test_name_roundtrips_through_table() {
        for cp in Codepage::ALL {
            assert_eq!(Codepage::from_name(cp.name()), Ok(cp));
            assert_eq!(Codepage::from_repr(cp as u8), Some(cp));
        }
    }

    #[test]
    fn test_select_command() {
        assert_eq!(Codepage::Gbk.select_command(), vec![0x1C, 0x26]);
        assert_eq!(
            Codepage::Cp437.select_command(),
            vec![0x1C, 0x2E, 0x1B, 0x74, 0x00]
        );
    }

    #[test]
    fn test_serde_by_name() {
        let cp: Codepage = serde_json::from_str("\"gb18030\"").unwrap();
        assert_eq!(cp, Codepage::Gb18030);
        assert_eq!(serde_json::to_string(&Codepage::Big5).unwrap(), "\"Big5\"");
        assert!(serde_json::from_str::<Codepage>("\"utf-7\"").is_err());
    }
}
