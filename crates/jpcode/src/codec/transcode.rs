//! The Shift-JIS and UTF-8 transcoder every [`Dialect`] configures.

use alloc::vec::Vec;

use log::trace;

use super::{
    ESC, PLACEHOLDER,
    dialect::{Dialect, Fallback, Profile},
    jsky, parse_numeric_reference, push_numeric_reference,
    sjis::{SjisClass, class, is_trail},
    utf8,
};
use crate::{
    ConvertOptions,
    tables::{EMOJI_BASE, LookupTables, TableView},
};

/// Plane 15, where carrier emoji live in Unicode.
const CARRIER_PLANE: core::ops::RangeInclusive<u32> = 0xF_0000..=0xF_FFFF;

pub(crate) fn sjis_to_utf8(tables: &LookupTables<'_>, dialect: Dialect, input: &[u8]) -> Vec<u8> {
    let profile = dialect.profile();
    let mut decoder = Decoder {
        emoji: profile.carrier.map(|c| tables.carrier_to_utf8(c)),
        direct: tables.sjis_to_utf8(),
        profile,
        out: Vec::with_capacity(input.len() * 3 / 2 + 4),
    };
    let mut rest = input;
    while !rest.is_empty() {
        let consumed = decoder.step(rest);
        rest = &rest[consumed..];
    }
    trace!(
        "sjis->utf8 ({dialect:?}): {} -> {} bytes",
        input.len(),
        decoder.out.len()
    );
    decoder.out
}

pub(crate) fn utf8_to_sjis(
    tables: &LookupTables<'_>,
    dialect: Dialect,
    options: &ConvertOptions,
    input: &[u8],
) -> Vec<u8> {
    let profile = dialect.profile();
    let fallback = match profile.fallback {
        Fallback::NumericReference if options.numeric_references => Fallback::NumericReference,
        _ => Fallback::Placeholder,
    };
    let mut encoder = Encoder {
        emoji: profile.carrier.map(|c| tables.utf8_to_carrier(c)),
        direct: tables.ucs2_to_sjis(),
        profile,
        fallback,
        out: Vec::with_capacity(input.len() + 4),
    };
    let mut rest = input;
    while !rest.is_empty() {
        let consumed = encoder.step(rest);
        rest = &rest[consumed..];
    }
    let out = if encoder.profile.escape_runs && options.pack_jsky_escapes {
        jsky::pack_jsky_escapes(&encoder.out)
    } else {
        encoder.out
    };
    trace!(
        "utf8->sjis ({dialect:?}): {} -> {} bytes",
        input.len(),
        out.len()
    );
    out
}

struct Decoder<'t> {
    profile: Profile,
    direct: TableView<'t>,
    emoji: Option<TableView<'t>>,
    out: Vec<u8>,
}

impl Decoder<'_> {
    /// Decodes one unit at the head of `rest` and returns its length.
    fn step(&mut self, rest: &[u8]) -> usize {
        match *rest {
            [ESC, ..] if self.profile.escape_runs => self.escape_run(rest),
            [b'&', b'#', ..] if self.profile.emoji_references.is_some() => {
                self.emoji_reference(rest)
            }
            [byte @ 0x00..=0x7F, ..] => {
                self.out.push(byte);
                1
            }
            [kana @ 0xA1..=0xDF, ..] => {
                self.push_mapped(self.direct.lookup(usize::from(kana)));
                1
            }
            [lead, trail, ..] => {
                let code = usize::from(u16::from_be_bytes([lead, trail]));
                if let Some(index) = self.profile.emoji_index(lead, trail) {
                    let emoji = self.emoji.and_then(|table| table.lookup(index));
                    self.push_mapped(emoji.or_else(|| self.direct.lookup(code)));
                    2
                } else if class(lead) == SjisClass::Lead && is_trail(trail) {
                    self.push_mapped(self.direct.lookup(code));
                    2
                } else {
                    self.out.push(PLACEHOLDER);
                    1
                }
            }
            _ => {
                self.out.push(PLACEHOLDER);
                1
            }
        }
    }

    fn push_mapped(&mut self, bytes: Option<&[u8]>) {
        match bytes {
            Some(bytes) => self.out.extend_from_slice(bytes),
            None => self.out.push(PLACEHOLDER),
        }
    }

    fn escape_run(&mut self, rest: &[u8]) -> usize {
        let Some(run) = jsky::parse_run(rest) else {
            self.out.push(ESC);
            return 1;
        };
        for &byte in run.payload {
            let index = usize::from(run.group) << 8 | usize::from(byte);
            if let Some(emoji) = self.emoji.and_then(|table| table.lookup(index)) {
                self.out.extend_from_slice(emoji);
            }
        }
        run.len
    }

    fn emoji_reference(&mut self, rest: &[u8]) -> usize {
        let decoded = parse_numeric_reference(rest).and_then(|(value, len)| {
            let range = self.profile.emoji_references.as_ref()?;
            let offset = range.contains(&value).then(|| value - range.start())?;
            let bytes = self.emoji?.lookup(usize::try_from(offset).ok()?)?;
            Some((bytes, len))
        });
        match decoded {
            Some((bytes, len)) => {
                self.out.extend_from_slice(bytes);
                len
            }
            None => {
                self.out.push(b'&');
                1
            }
        }
    }
}

struct Encoder<'t> {
    profile: Profile,
    fallback: Fallback,
    direct: TableView<'t>,
    emoji: Option<TableView<'t>>,
    out: Vec<u8>,
}

impl Encoder<'_> {
    /// Encodes one unit at the head of `rest` and returns its length.
    fn step(&mut self, rest: &[u8]) -> usize {
        match *rest {
            [b'&', b'#', ..] if self.profile.emoji_references.is_some() => {
                self.emoji_reference(rest)
            }
            [byte @ 0x00..=0x7F, ..] => {
                self.out.push(byte);
                1
            }
            _ => match utf8::decode(rest) {
                Some((ucs, len)) => {
                    self.encode(ucs);
                    len
                }
                None => {
                    self.out.push(PLACEHOLDER);
                    1
                }
            },
        }
    }

    /// Emoji references name a plane-15 code point. Values above the emoji
    /// range take the ordinary path for the value itself, lower values stay
    /// text.
    fn emoji_reference(&mut self, rest: &[u8]) -> usize {
        let Some(range) = self.profile.emoji_references.clone() else {
            self.out.push(b'&');
            return 1;
        };
        match parse_numeric_reference(rest) {
            Some((value, len)) if value >= *range.start() => {
                self.encode(if range.contains(&value) {
                    0xF_0000 | value
                } else {
                    value
                });
                len
            }
            _ => {
                self.out.push(b'&');
                1
            }
        }
    }

    fn encode(&mut self, ucs: u32) {
        if CARRIER_PLANE.contains(&ucs) {
            let emoji = ucs
                .checked_sub(EMOJI_BASE)
                .and_then(|offset| usize::try_from(offset).ok())
                .zip(self.emoji)
                .and_then(|(offset, table)| table.lookup(offset));
            match emoji {
                Some(bytes) => self.out.extend_from_slice(bytes),
                None => self.out.push(PLACEHOLDER),
            }
            return;
        }

        let mapped = u16::try_from(ucs)
            .ok()
            .and_then(|unit| self.direct.lookup(usize::from(unit)));
        match (mapped, u8::try_from(ucs)) {
            (Some(bytes), _) => self.out.extend_from_slice(bytes),
            (None, Ok(ascii)) if ascii.is_ascii() => self.out.push(ascii),
            (None, _) => match self.fallback {
                Fallback::NumericReference => push_numeric_reference(&mut self.out, ucs),
                Fallback::Placeholder => self.out.push(PLACEHOLDER),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;
    use crate::tests::fixtures::tables;

    fn encode(dialect: Dialect, input: &str) -> Vec<u8> {
        utf8_to_sjis(
            tables(),
            dialect,
            &ConvertOptions::default(),
            input.as_bytes(),
        )
    }

    #[rstest]
    #[case(b"a\x82\xA0b", "aあb")]
    #[case(b"\xB1", "ｱ")]
    #[case(b"\x85\x40", "?")]
    #[case(b"\x80\xA0\xFD", "???")]
    #[case(b"\x82\x7F", "?\x7F")]
    #[case(b"\x82", "?")]
    fn standard_decoding(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(
            sjis_to_utf8(tables(), Dialect::Standard, input),
            expected.as_bytes()
        );
    }

    #[rstest]
    #[case("aあ", b"a\x82\xA0")]
    #[case("€", b"&#8364;")]
    #[case("😀", b"&#128512;")]
    #[case("\u{FF89F}", b"?")]
    #[case("\0", b"\0")]
    fn standard_encoding(#[case] input: &str, #[case] expected: &[u8]) {
        assert_eq!(encode(Dialect::Standard, input), expected);
    }

    #[test]
    fn malformed_utf8_costs_one_byte() {
        let out = utf8_to_sjis(
            tables(),
            Dialect::Standard,
            &ConvertOptions::default(),
            b"\xE3\x81a\xC0\x81\xFF",
        );
        assert_eq!(out, b"??a\x01?");
    }

    #[test]
    fn placeholders_replace_references_when_disabled() {
        let options = ConvertOptions {
            numeric_references: false,
            ..ConvertOptions::default()
        };
        let out = utf8_to_sjis(tables(), Dialect::Standard, &options, "x€".as_bytes());
        assert_eq!(out, b"x?");
    }

    #[rstest]
    #[case(Dialect::Imode, b"\xF8\x9F", "\u{FF89F}")]
    #[case(Dialect::Doti, b"\xF0\x40", "\u{FF040}")]
    #[case(Dialect::Jsky, b"\x1b$G!\x0f", "\u{FFB41}")]
    fn carrier_emoji_round_trip(
        #[case] dialect: Dialect,
        #[case] sjis: &[u8],
        #[case] unicode: &str,
    ) {
        assert_eq!(sjis_to_utf8(tables(), dialect, sjis), unicode.as_bytes());
        assert_eq!(encode(dialect, unicode), sjis);
    }

    #[test]
    fn standard_codec_does_not_know_carrier_leads() {
        assert_eq!(sjis_to_utf8(tables(), Dialect::Standard, b"\xF8\x9F"), b"?");
        assert_eq!(sjis_to_utf8(tables(), Dialect::Imode, b"\xF8\x9F"), "\u{FF89F}".as_bytes());
    }

    #[test]
    fn carrier_leads_fall_back_to_the_direct_table() {
        // 0xF040 is not an i-mode code, 0xF8A0 is unmapped in both tables.
        assert_eq!(sjis_to_utf8(tables(), Dialect::Imode, b"\xF8\xA0"), b"?");
        assert_eq!(
            sjis_to_utf8(tables(), Dialect::Doti, b"\xF1\x40"),
            "\u{E0BC}".as_bytes()
        );
    }

    #[test]
    fn dialects_never_write_references() {
        assert_eq!(encode(Dialect::Imode, "€😀\u{FF000}"), b"???");
        assert_eq!(encode(Dialect::Jsky, "\u{F0000}"), b"?");
    }

    #[rstest]
    #[case(b"&#61504;", "\u{FF040}")]
    #[case(b"&#61505;", "&#61505;")]
    #[case(b"&#62720;", "&#62720;")]
    #[case(b"&#x;", "&#x;")]
    fn doti_references_decode_to_emoji(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(sjis_to_utf8(tables(), Dialect::Doti, input), expected.as_bytes());
    }

    #[rstest]
    #[case("&#61504;", b"\xF0\x40")]
    #[case("&#62720;", b"?")]
    #[case("&#63744;", b"?")]
    #[case("&#65535;", b"?")]
    #[case("&#1114111;", b"?")]
    #[case("&#57532;", b"&#57532;")]
    #[case("&#65;", b"&#65;")]
    #[case("&#61504", b"&#61504")]
    fn doti_references_encode_to_sjis(#[case] input: &str, #[case] expected: &[u8]) {
        assert_eq!(encode(Dialect::Doti, input), expected);
    }

    #[rstest]
    #[case(b"\x1b$G!\"\x0f", "\u{FFB41}\u{FFB42}")]
    #[case(b"\x1b$G!#\x0f", "\u{FFB41}")]
    #[case(b"\x1b$G#\x0f", "")]
    #[case(b"\x1b$G!", "\x1b$G!")]
    #[case(b"\x1b$Q!\x0f", "\x1b$Q!\x0f")]
    fn jsky_escape_runs(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(sjis_to_utf8(tables(), Dialect::Jsky, input), expected.as_bytes());
    }

    #[test]
    fn jsky_output_is_packed_unless_disabled() {
        let input = "\u{FFB41}\u{FFB42}\u{FF941}".as_bytes();
        assert_eq!(
            encode(Dialect::Jsky, "\u{FFB41}\u{FFB42}\u{FF941}"),
            b"\x1b$G!\"\x0f\x1b$E!\x0f"
        );

        let options = ConvertOptions {
            pack_jsky_escapes: false,
            ..ConvertOptions::default()
        };
        assert_eq!(
            utf8_to_sjis(tables(), Dialect::Jsky, &options, input),
            b"\x1b$G!\x0f\x1b$G\"\x0f\x1b$E!\x0f"
        );
    }
}
