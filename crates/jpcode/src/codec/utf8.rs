//! UTF-8 framing shared by every Unicode codec.
//!
//! Decoding accepts the historical 5- and 6-byte forms and does not reject
//! overlong encodings; callers map whatever value comes out.

use alloc::vec::Vec;

use super::PLACEHOLDER;

/// Length of the sequence a lead byte announces. `None` for continuation
/// bytes and `0xFE`/`0xFF`.
pub(crate) const fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        0xF8..=0xFB => Some(5),
        0xFC..=0xFD => Some(6),
        _ => None,
    }
}

/// Decodes the sequence at the head of `input`, returning the code point and
/// its length. `None` for a bad lead, a truncated tail or a bad continuation
/// byte.
pub(crate) fn decode(input: &[u8]) -> Option<(u32, usize)> {
    let lead = *input.first()?;
    let len = sequence_len(lead)?;
    let tail = input.get(1..len)?;
    if !tail.iter().all(|b| (0x80..=0xBF).contains(b)) {
        return None;
    }
    let payload = match len {
        1 => 0x7F,
        2 => 0x1F,
        3 => 0x0F,
        4 => 0x07,
        5 => 0x03,
        _ => 0x01,
    };
    let ucs = tail
        .iter()
        .fold(u32::from(lead & payload), |acc, &b| (acc << 6) | u32::from(b & 0x3F));
    Some((ucs, len))
}

/// Appends a BMP code unit as 1, 2 or 3 bytes of UTF-8.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn push_bmp(out: &mut Vec<u8>, unit: u16) {
    match unit {
        0x0000..=0x007F => out.push(unit as u8),
        0x0080..=0x07FF => out.extend_from_slice(&[0xC0 | (unit >> 6) as u8, 0x80 | (unit & 0x3F) as u8]),
        _ => out.extend_from_slice(&[
            0xE0 | (unit >> 12) as u8,
            0x80 | ((unit >> 6) & 0x3F) as u8,
            0x80 | (unit & 0x3F) as u8,
        ]),
    }
}

/// UTF-8 narrowed to ASCII: every other character, and every malformed
/// byte, becomes `?`.
pub(crate) fn to_ascii(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut rest = input;
    while !rest.is_empty() {
        let (byte, consumed) = match decode(rest) {
            Some((ucs, len)) => (
                u8::try_from(ucs)
                    .ok()
                    .filter(u8::is_ascii)
                    .unwrap_or(PLACEHOLDER),
                len,
            ),
            None => (PLACEHOLDER, 1),
        };
        out.push(byte);
        rest = &rest[consumed..];
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"A", Some((0x41, 1)))]
    #[case("あ".as_bytes(), Some((0x3042, 3)))]
    #[case("\u{FF89F}".as_bytes(), Some((0xF_F89F, 4)))]
    #[case(b"\xF8\x88\x80\x80\x80", Some((0x20_0000, 5)))]
    #[case(b"\xFD\xBF\xBF\xBF\xBF\xBF", Some((0x7FFF_FFFF, 6)))]
    #[case(b"\xC0\x80", Some((0, 2)))]
    #[case(b"\xE3\x81", None)]
    #[case(b"\xE3\x41\x82", None)]
    #[case(b"\x82", None)]
    #[case(b"\xFE", None)]
    fn decodes_heads(#[case] input: &[u8], #[case] expected: Option<(u32, usize)>) {
        assert_eq!(decode(input), expected);
    }

    #[test]
    fn ascii_keeps_one_byte_per_character() {
        assert_eq!(to_ascii("aあ😀\x7F".as_bytes()), b"a??\x7F");
        assert_eq!(to_ascii(b"\xE3\x81z"), b"??z");
    }

    #[test]
    fn bmp_matches_core_encoding() {
        for unit in [0x24_u16, 0xA2, 0x20AC, 0xFF71, 0xFFFD] {
            let mut out = Vec::new();
            push_bmp(&mut out, unit);
            let ch = char::from_u32(u32::from(unit)).unwrap();
            let mut expected = [0; 4];
            assert_eq!(out, ch.encode_utf8(&mut expected).as_bytes());
        }
    }
}
