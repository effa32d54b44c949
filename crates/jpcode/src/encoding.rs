//! Encoding identifiers shared by the detector and the converter.

use alloc::string::String;
use core::{fmt, str::FromStr};

use thiserror::Error;

use crate::codec::Dialect;

/// An encoding the detector can report or the converter can handle.
///
/// The canonical names (used by [`Display`](fmt::Display), [`FromStr`] and
/// serde) are `unknown`, `ascii`, `sjis`, `eucjp`, `jis`, `utf8`, `utf16`,
/// `utf32`, `utf32-be`, `utf32-le`, `sjis-jsky`, `sjis-imode`, `sjis-doti`
/// and `ucs2`.
///
/// ```
/// use jpcode::Encoding;
///
/// assert_eq!("euc-jp".parse::<Encoding>(), Ok(Encoding::EucJp));
/// assert_eq!(Encoding::SjisImode.to_string(), "sjis-imode");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// No candidate fits the input.
    #[cfg_attr(feature = "serde", serde(rename = "unknown"))]
    Unknown,
    /// 7-bit text without ISO-2022 designations.
    #[cfg_attr(feature = "serde", serde(rename = "ascii"))]
    Ascii,
    /// Shift-JIS.
    #[cfg_attr(feature = "serde", serde(rename = "sjis"))]
    Sjis,
    /// EUC-JP.
    #[cfg_attr(feature = "serde", serde(rename = "eucjp"))]
    EucJp,
    /// ISO-2022-JP.
    #[cfg_attr(feature = "serde", serde(rename = "jis"))]
    Jis,
    /// UTF-8.
    #[cfg_attr(feature = "serde", serde(rename = "utf8"))]
    Utf8,
    /// UTF-16 with a byte-order mark. Detected only.
    #[cfg_attr(feature = "serde", serde(rename = "utf16"))]
    Utf16,
    /// UTF-32 with a byte-order mark. Detected only.
    #[cfg_attr(feature = "serde", serde(rename = "utf32"))]
    Utf32,
    /// Big-endian UTF-32 without a byte-order mark. Detected only.
    #[cfg_attr(feature = "serde", serde(rename = "utf32-be"))]
    Utf32Be,
    /// Little-endian UTF-32 without a byte-order mark. Detected only.
    #[cfg_attr(feature = "serde", serde(rename = "utf32-le"))]
    Utf32Le,
    /// Shift-JIS with j-sky emoji escapes.
    #[cfg_attr(feature = "serde", serde(rename = "sjis-jsky"))]
    SjisJsky,
    /// Shift-JIS with i-mode emoji.
    #[cfg_attr(feature = "serde", serde(rename = "sjis-imode"))]
    SjisImode,
    /// Shift-JIS with dot-i emoji.
    #[cfg_attr(feature = "serde", serde(rename = "sjis-doti"))]
    SjisDoti,
    /// Big-endian UCS-2. Converted, never detected.
    #[cfg_attr(feature = "serde", serde(rename = "ucs2"))]
    Ucs2,
}

/// Every encoding, in declaration order.
const ALL: [Encoding; 14] = [
    Encoding::Unknown,
    Encoding::Ascii,
    Encoding::Sjis,
    Encoding::EucJp,
    Encoding::Jis,
    Encoding::Utf8,
    Encoding::Utf16,
    Encoding::Utf32,
    Encoding::Utf32Be,
    Encoding::Utf32Le,
    Encoding::SjisJsky,
    Encoding::SjisImode,
    Encoding::SjisDoti,
    Encoding::Ucs2,
];

impl Encoding {
    /// The canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Ascii => "ascii",
            Self::Sjis => "sjis",
            Self::EucJp => "eucjp",
            Self::Jis => "jis",
            Self::Utf8 => "utf8",
            Self::Utf16 => "utf16",
            Self::Utf32 => "utf32",
            Self::Utf32Be => "utf32-be",
            Self::Utf32Le => "utf32-le",
            Self::SjisJsky => "sjis-jsky",
            Self::SjisImode => "sjis-imode",
            Self::SjisDoti => "sjis-doti",
            Self::Ucs2 => "ucs2",
        }
    }

    /// Whether [`Converter`](crate::Converter) accepts this encoding as a
    /// source or target.
    #[must_use]
    pub const fn is_convertible(self) -> bool {
        !matches!(
            self,
            Self::Unknown | Self::Utf16 | Self::Utf32 | Self::Utf32Be | Self::Utf32Le
        )
    }

    /// The Shift-JIS dialect this encoding denotes, if it is one.
    #[must_use]
    pub const fn dialect(self) -> Option<Dialect> {
        match self {
            Self::Sjis => Some(Dialect::Standard),
            Self::SjisImode => Some(Dialect::Imode),
            Self::SjisJsky => Some(Dialect::Jsky),
            Self::SjisDoti => Some(Dialect::Doti),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string that names no known encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown encoding name `{0}`")]
pub struct ParseEncodingError(pub String);

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    /// Parses a canonical name or one of the aliases `euc`, `euc-jp`,
    /// `shift_jis`, `iso-2022-jp` and `utf-8`. Matching ignores ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alias = match s.to_ascii_lowercase().as_str() {
            "euc" | "euc-jp" => Some(Self::EucJp),
            "shift_jis" => Some(Self::Sjis),
            "iso-2022-jp" => Some(Self::Jis),
            "utf-8" => Some(Self::Utf8),
            _ => None,
        };
        alias
            .or_else(|| ALL.into_iter().find(|e| e.name().eq_ignore_ascii_case(s)))
            .ok_or_else(|| ParseEncodingError(s.into()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    #[test]
    fn names_round_trip() {
        for encoding in ALL {
            assert_eq!(encoding.to_string().parse::<Encoding>(), Ok(encoding));
        }
    }

    #[rstest]
    #[case("EUC", Encoding::EucJp)]
    #[case("euc-jp", Encoding::EucJp)]
    #[case("Shift_JIS", Encoding::Sjis)]
    #[case("iso-2022-jp", Encoding::Jis)]
    #[case("UTF-8", Encoding::Utf8)]
    #[case("SJIS-DOTI", Encoding::SjisDoti)]
    fn aliases(#[case] name: &str, #[case] expected: Encoding) {
        assert_eq!(name.parse::<Encoding>(), Ok(expected));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "latin1".parse::<Encoding>().unwrap_err();
        assert_eq!(err.to_string(), "unknown encoding name `latin1`");
    }

    #[test]
    fn detect_only_encodings_are_not_convertible() {
        let blocked: alloc::vec::Vec<_> =
            ALL.into_iter().filter(|e| !e.is_convertible()).collect();
        assert_eq!(
            blocked,
            [
                Encoding::Unknown,
                Encoding::Utf16,
                Encoding::Utf32,
                Encoding::Utf32Be,
                Encoding::Utf32Le
            ]
        );
    }
}
