//! ISO-2022-JP ("JIS") encoding and decoding against Shift-JIS.

use alloc::vec::Vec;

use bstr::ByteSlice;
use log::trace;

use super::{
    ESC, UNDEFINED_JIS, UNDEFINED_SJIS,
    sjis::{SjisClass, class, from_euc, is_trail, to_euc},
};

/// The character set currently designated into G0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Ascii,
    Jis0208,
    Jis0212,
    Kana,
}

impl EscapeState {
    /// Designations recognised on input. JIS C 6226 (`ESC $ @`) reads as
    /// JIS X 0208 and JIS X 0201 Roman (`ESC ( J`) as ASCII.
    const DESIGNATIONS: [(&'static [u8], Self); 6] = [
        (b"\x1b(B", Self::Ascii),
        (b"\x1b(J", Self::Ascii),
        (b"\x1b$(D", Self::Jis0212),
        (b"\x1b$B", Self::Jis0208),
        (b"\x1b$@", Self::Jis0208),
        (b"\x1b(I", Self::Kana),
    ];

    /// The escape written when switching into this state.
    const fn designation(self) -> &'static [u8] {
        match self {
            Self::Ascii => b"\x1b(B",
            Self::Jis0208 => b"\x1b$B",
            Self::Jis0212 => b"\x1b$(D",
            Self::Kana => b"\x1b(I",
        }
    }

    /// The state and escape length of a designation at the start of `input`.
    fn designated_by(input: &[u8]) -> Option<(Self, usize)> {
        Self::DESIGNATIONS
            .iter()
            .find(|(escape, _)| input.starts_with(escape))
            .map(|&(escape, state)| (state, escape.len()))
    }
}

/// Shift-JIS to ISO-2022-JP.
///
/// Designations are written only when the character class changes, and the
/// output always ends in ASCII. A lead byte without a valid trail becomes the
/// 7-bit sentinel `0x22 0x77`.
///
/// ```
/// assert_eq!(
///     jpcode::sjis_to_jis(b"a\x8A\xBFb"),
///     b"a\x1b$B\x34\x41\x1b(Bb"
/// );
/// ```
#[must_use]
pub fn sjis_to_jis(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + 8);
    let mut state = EscapeState::Ascii;
    let mut rest = input;
    while let [byte, ..] = *rest {
        let next = match class(byte) {
            SjisClass::Through => EscapeState::Ascii,
            SjisClass::Lead => EscapeState::Jis0208,
            SjisClass::Kana => EscapeState::Kana,
        };
        if next != state {
            out.extend_from_slice(next.designation());
            state = next;
        }
        let consumed = match next {
            EscapeState::Jis0208 => match rest.get(1) {
                Some(&trail) if is_trail(trail) => {
                    let [first, second] = to_euc(byte, trail);
                    out.extend_from_slice(&[first & 0x7F, second & 0x7F]);
                    2
                }
                _ => {
                    out.extend_from_slice(&UNDEFINED_JIS);
                    1
                }
            },
            EscapeState::Kana => {
                out.push(byte & 0x7F);
                1
            }
            EscapeState::Ascii | EscapeState::Jis0212 => {
                out.push(byte);
                1
            }
        };
        rest = &rest[consumed..];
    }
    if state != EscapeState::Ascii {
        out.extend_from_slice(EscapeState::Ascii.designation());
    }
    trace!("sjis->jis: {} -> {} bytes", input.len(), out.len());
    out
}

/// ISO-2022-JP to Shift-JIS.
///
/// Bytes before the first designation are copied as they are. JIS X 0212
/// characters become `0x81 0xAC`, as does a JIS X 0208 byte left without a
/// partner. An unknown escape is copied and switches back to ASCII.
///
/// ```
/// assert_eq!(
///     jpcode::jis_to_sjis(b"a\x1b$B\x34\x41\x1b(Bb"),
///     b"a\x8A\xBFb"
/// );
/// ```
#[must_use]
pub fn jis_to_sjis(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut state = EscapeState::Ascii;
    let mut rest = input;
    while let [byte, ..] = *rest {
        if byte == ESC {
            match EscapeState::designated_by(rest) {
                Some((next, len)) => {
                    state = next;
                    rest = &rest[len..];
                }
                None => {
                    out.push(ESC);
                    state = EscapeState::Ascii;
                    rest = &rest[1..];
                }
            }
            continue;
        }

        let (run, tail) = rest.split_at(rest.find_byte(ESC).unwrap_or(rest.len()));
        match state {
            EscapeState::Ascii => out.extend_from_slice(run),
            EscapeState::Kana => out.extend(run.iter().map(|b| b | 0x80)),
            EscapeState::Jis0212 => {
                for _ in run.chunks_exact(2) {
                    out.extend_from_slice(&UNDEFINED_SJIS);
                }
            }
            EscapeState::Jis0208 => {
                let pairs = run.chunks_exact(2);
                let unpaired = !pairs.remainder().is_empty();
                for pair in pairs {
                    out.extend_from_slice(&from_euc(pair[0] | 0x80, pair[1] | 0x80));
                }
                if unpaired {
                    out.extend_from_slice(&UNDEFINED_SJIS);
                }
            }
        }
        rest = tail;
    }
    trace!("jis->sjis: {} -> {} bytes", input.len(), out.len());
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"a\x8A\xBFb", b"a\x1b$B4A\x1b(Bb")]
    #[case(b"\x82\xA0\x82\xA2", b"\x1b$B$\"$$\x1b(B")]
    #[case(b"\xB1\xB2a", b"\x1b(I12\x1b(Ba")]
    #[case(b"\x82\xA0\xB1", b"\x1b$B$\"\x1b(I1\x1b(B")]
    #[case(b"\x82", b"\x1b$B\"w\x1b(B")]
    #[case(b"\x82a", b"\x1b$B\"w\x1b(Ba")]
    #[case(b"abc", b"abc")]
    fn encodes_with_minimal_escapes(#[case] sjis: &[u8], #[case] jis: &[u8]) {
        assert_eq!(sjis_to_jis(sjis), jis);
    }

    #[rstest]
    #[case(b"a\x1b$B4A\x1b(Bb", b"a\x8A\xBFb")]
    #[case(b"\x1b$@4A\x1b(J", b"\x8A\xBF")]
    #[case(b"\x1b$@4A\x1b(Jb", b"\x8A\xBFb")]
    #[case(b"\x1b$A4A", b"\x1b$A4A")]
    #[case(b"\x1b$B4A4", b"\x8A\xBF\x81\xAC")]
    #[case(b"\x1b$B4\x1b(Bz", b"\x81\xAC\x7A")]
    #[case(b"\x1b$(D\"/\"/x", b"\x81\xAC\x81\xAC")]
    #[case(b"\x1b(I12", b"\xB1\xB2")]
    #[case(b"\x1b$B4A\x1b[0mX", b"\x8A\xBF\x1b[0mX")]
    #[case(b"lead\x1b(Btail", b"leadtail")]
    fn decodes_escape_states(#[case] jis: &[u8], #[case] sjis: &[u8]) {
        assert_eq!(jis_to_sjis(jis), sjis);
    }
}
