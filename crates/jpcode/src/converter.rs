use alloc::{borrow::Cow, vec::Vec};

use log::trace;

use crate::{
    ConvertError, ConvertOptions, Dialect, Encoding, LookupTables, Result,
    codec::{self, utf8},
    detect,
};

/// Converts between any two convertible [`Encoding`]s.
///
/// Shift-JIS, EUC-JP and ISO-2022-JP convert among themselves directly.
/// Every other pair goes through UTF-8, using the tables for the Shift-JIS
/// family.
///
/// ```
/// use jpcode::{ConvertOptions, Converter, Encoding, TableBuilder};
///
/// let mut builder = TableBuilder::new();
/// builder.map_sjis(0x8ABF, '漢');
/// let tables = builder.build();
/// let converter = Converter::new(&tables, ConvertOptions::default());
///
/// let jis = converter.convert("a漢".as_bytes(), Encoding::Utf8, Encoding::Jis)?;
/// assert_eq!(jis, b"a\x1b$B4A\x1b(B");
///
/// let (detected, utf8) = converter.convert_auto(&jis, Encoding::Utf8)?;
/// assert_eq!(detected, Encoding::Jis);
/// assert_eq!(utf8, "a漢".as_bytes());
/// # Ok::<(), jpcode::ConvertError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Converter<'t> {
    tables: &'t LookupTables<'t>,
    options: ConvertOptions,
}

impl<'t> Converter<'t> {
    /// A converter reading from `tables`.
    #[must_use]
    pub fn new(tables: &'t LookupTables<'t>, options: ConvertOptions) -> Self {
        Self { tables, options }
    }

    /// The options this converter was built with.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Shift-JIS to UTF-8.
    #[must_use]
    pub fn sjis_to_utf8(&self, input: &[u8]) -> Vec<u8> {
        self.dialect_to_utf8(Dialect::Standard, input)
    }

    /// UTF-8 to Shift-JIS.
    #[must_use]
    pub fn utf8_to_sjis(&self, input: &[u8]) -> Vec<u8> {
        self.utf8_to_dialect(Dialect::Standard, input)
    }

    /// Shift-JIS in the given dialect to UTF-8. Carrier emoji become
    /// plane-15 code points.
    #[must_use]
    pub fn dialect_to_utf8(&self, dialect: Dialect, input: &[u8]) -> Vec<u8> {
        codec::sjis_to_utf8(self.tables, dialect, input)
    }

    /// UTF-8 to Shift-JIS in the given dialect.
    #[must_use]
    pub fn utf8_to_dialect(&self, dialect: Dialect, input: &[u8]) -> Vec<u8> {
        codec::utf8_to_sjis(self.tables, dialect, &self.options, input)
    }

    /// Converts `input` from one encoding to another. Identical encodings
    /// copy the input.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Unsupported`] when either encoding can only be
    /// detected, [`ConvertError::Codec`] for odd-length UCS-2 input.
    pub fn convert(&self, input: &[u8], from: Encoding, to: Encoding) -> Result<Vec<u8>> {
        if let Some(unsupported) = [from, to].into_iter().find(|e| !e.is_convertible()) {
            return Err(ConvertError::Unsupported(unsupported));
        }
        let out = if from == to {
            input.to_vec()
        } else if is_legacy(from) && is_legacy(to) {
            legacy_to_legacy(input, from, to)
        } else {
            let utf8 = self.decode(input, from)?;
            self.encode(&utf8, to)
        };
        trace!(
            "Converted {from} -> {to}: {} -> {} bytes",
            input.len(),
            out.len()
        );
        Ok(out)
    }

    /// Detects the encoding of `input`, then converts it to `to`.
    ///
    /// Empty input converts to empty output and reports
    /// [`Encoding::Unknown`].
    ///
    /// # Errors
    ///
    /// [`ConvertError::Unsupported`] when the detected encoding cannot be
    /// converted, including [`Encoding::Unknown`] for non-empty input.
    pub fn convert_auto(&self, input: &[u8], to: Encoding) -> Result<(Encoding, Vec<u8>)> {
        if input.is_empty() {
            return Ok((Encoding::Unknown, Vec::new()));
        }
        let from = detect(input);
        let out = self.convert(input, from, to)?;
        Ok((from, out))
    }

    fn decode<'i>(&self, input: &'i [u8], from: Encoding) -> Result<Cow<'i, [u8]>> {
        let utf8 = match from {
            Encoding::Utf8 | Encoding::Ascii => Cow::Borrowed(input),
            Encoding::Ucs2 => Cow::Owned(codec::ucs2_to_utf8(input)?),
            Encoding::EucJp => Cow::Owned(self.sjis_to_utf8(&codec::eucjp_to_sjis(input))),
            Encoding::Jis => Cow::Owned(self.sjis_to_utf8(&codec::jis_to_sjis(input))),
            other => match other.dialect() {
                Some(dialect) => Cow::Owned(self.dialect_to_utf8(dialect, input)),
                None => return Err(ConvertError::Unsupported(other)),
            },
        };
        Ok(utf8)
    }

    fn encode(&self, utf8: &[u8], to: Encoding) -> Vec<u8> {
        match to {
            Encoding::Ascii => utf8::to_ascii(utf8),
            Encoding::Ucs2 => codec::utf8_to_ucs2(utf8),
            Encoding::EucJp => codec::sjis_to_eucjp(&self.utf8_to_sjis(utf8)),
            Encoding::Jis => codec::sjis_to_jis(&self.utf8_to_sjis(utf8)),
            other => match other.dialect() {
                Some(dialect) => self.utf8_to_dialect(dialect, utf8),
                None => utf8.to_vec(),
            },
        }
    }
}

/// Encodings that convert among themselves without a Unicode round trip.
const fn is_legacy(encoding: Encoding) -> bool {
    matches!(encoding, Encoding::Sjis | Encoding::EucJp | Encoding::Jis)
}

fn legacy_to_legacy(input: &[u8], from: Encoding, to: Encoding) -> Vec<u8> {
    let sjis = match from {
        Encoding::EucJp => Cow::Owned(codec::eucjp_to_sjis(input)),
        Encoding::Jis => Cow::Owned(codec::jis_to_sjis(input)),
        _ => Cow::Borrowed(input),
    };
    match to {
        Encoding::EucJp => codec::sjis_to_eucjp(&sjis),
        Encoding::Jis => codec::sjis_to_jis(&sjis),
        _ => sjis.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;
    use crate::{CodecError, tests::fixtures::tables};

    fn converter() -> Converter<'static> {
        Converter::new(tables(), ConvertOptions::default())
    }

    #[rstest]
    #[case(Encoding::Sjis, b"a\x82\xA0\xB1")]
    #[case(Encoding::EucJp, b"a\xA4\xA2\x8E\xB1")]
    #[case(Encoding::Jis, b"a\x1b$B$\"\x1b(I1\x1b(B")]
    #[case(Encoding::Ucs2, b"\x00a\x30\x42\xFF\x71")]
    #[case(Encoding::Utf8, "aあｱ".as_bytes())]
    #[case(Encoding::SjisImode, b"a\x82\xA0\xB1")]
    fn every_pair_agrees(#[case] from: Encoding, #[case] input: &[u8]) {
        let targets: [(Encoding, &[u8]); 5] = [
            (Encoding::Sjis, b"a\x82\xA0\xB1"),
            (Encoding::EucJp, b"a\xA4\xA2\x8E\xB1"),
            (Encoding::Jis, b"a\x1b$B$\"\x1b(I1\x1b(B"),
            (Encoding::Ucs2, b"\x00a\x30\x42\xFF\x71"),
            (Encoding::Utf8, "aあｱ".as_bytes()),
        ];
        for (to, expected) in targets {
            assert_eq!(
                converter().convert(input, from, to).unwrap(),
                expected,
                "{from} -> {to}"
            );
        }
    }

    #[test]
    fn legacy_pairs_skip_unicode() {
        // Unmapped in the tables, yet EUC-JP and Shift-JIS agree on it.
        let sjis = b"\x88\x9F";
        let euc = converter()
            .convert(sjis, Encoding::Sjis, Encoding::EucJp)
            .unwrap();
        assert_eq!(euc, b"\xB0\xA1");
        assert_eq!(
            converter().convert(sjis, Encoding::Sjis, Encoding::Utf8).unwrap(),
            b"?"
        );
    }

    #[test]
    fn emoji_cross_carriers_as_placeholders() {
        let out = converter()
            .convert(b"\xF8\x9F", Encoding::SjisImode, Encoding::SjisDoti)
            .unwrap();
        assert_eq!(out, b"?");
        let out = converter()
            .convert(b"\xF0\x40", Encoding::SjisDoti, Encoding::SjisDoti)
            .unwrap();
        assert_eq!(out, b"\xF0\x40");
    }

    #[rstest]
    #[case(Encoding::Unknown, Encoding::Utf8)]
    #[case(Encoding::Utf8, Encoding::Utf16)]
    #[case(Encoding::Utf32Le, Encoding::Sjis)]
    fn detect_only_encodings_are_rejected(#[case] from: Encoding, #[case] to: Encoding) {
        let unsupported = if from.is_convertible() { to } else { from };
        assert_eq!(
            converter().convert(b"x", from, to),
            Err(ConvertError::Unsupported(unsupported))
        );
    }

    #[test]
    fn odd_ucs2_surfaces_as_codec_error() {
        assert_eq!(
            converter().convert(b"\x00a\x00", Encoding::Ucs2, Encoding::Sjis),
            Err(ConvertError::Codec(CodecError::OddLength(3)))
        );
    }

    #[test]
    fn ascii_target_narrows() {
        let out = converter()
            .convert(b"a\x82\xA0", Encoding::Sjis, Encoding::Ascii)
            .unwrap();
        assert_eq!(out, b"a?");
    }

    #[test]
    fn auto_conversion_reports_the_source() {
        let converter = converter();
        assert_eq!(
            converter.convert_auto(b"\xA4\xA2", Encoding::Utf8),
            Ok((Encoding::EucJp, "あ".as_bytes().to_vec()))
        );
        assert_eq!(
            converter.convert_auto(b"", Encoding::Sjis),
            Ok((Encoding::Unknown, Vec::new()))
        );
        assert_eq!(
            converter.convert_auto(b"\xFF\xFF\xFF", Encoding::Sjis),
            Err(ConvertError::Unsupported(Encoding::Unknown))
        );
    }
}
