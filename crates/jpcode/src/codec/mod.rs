//! Pairwise transcoders over complete byte buffers.
//!
//! Shift-JIS is the hub for the legacy encodings and UTF-8 the hub for
//! Unicode. Every codec consumes its whole input and degrades unmappable
//! units locally; the only structural failure is odd-length UCS-2 input.

use alloc::vec::Vec;

mod dialect;
mod eucjp;
mod jis;
pub(crate) mod jsky;
mod sjis;
mod transcode;
mod ucs2;
pub(crate) mod utf8;

pub use dialect::Dialect;
pub use eucjp::{eucjp_to_sjis, sjis_to_eucjp};
pub use jis::{jis_to_sjis, sjis_to_jis};
pub(crate) use transcode::{sjis_to_utf8, utf8_to_sjis};
pub use ucs2::{ucs2_to_utf8, utf8_to_ucs2};

pub(crate) const ESC: u8 = 0x1B;
/// Shift-in, terminates a j-sky escape run.
pub(crate) const SI: u8 = 0x0F;

pub(crate) const PLACEHOLDER: u8 = b'?';
/// Shift-JIS stand-in for characters outside JIS X 0208 (`〓`).
pub(crate) const UNDEFINED_SJIS: [u8; 2] = [0x81, 0xAC];
/// 7-bit JIS X 0208 stand-in for malformed Shift-JIS.
pub(crate) const UNDEFINED_JIS: [u8; 2] = [0x22, 0x77];

/// Appends `&#<ucs>;`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn push_numeric_reference(out: &mut Vec<u8>, ucs: u32) {
    let mut digits = [0u8; 10];
    let mut start = digits.len();
    let mut rest = ucs;
    loop {
        start -= 1;
        digits[start] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    out.extend_from_slice(b"&#");
    out.extend_from_slice(&digits[start..]);
    out.push(b';');
}

/// Parses `&#<decimal>;` at the start of `input`.
///
/// At most seven digits are accepted so the terminator falls within eight
/// bytes of the `&#`. Returns the value and the length of the reference.
#[must_use]
pub fn parse_numeric_reference(input: &[u8]) -> Option<(u32, usize)> {
    let body = input.strip_prefix(b"&#")?;
    let window = &body[..body.len().min(8)];
    let end = window.iter().position(|&b| b == b';')?;
    let digits = &window[..end];
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
    Some((value, 2 + end + 1))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "&#0;")]
    #[case(8364, "&#8364;")]
    #[case(0x10_FFFF, "&#1114111;")]
    fn numeric_reference_digits(#[case] ucs: u32, #[case] expected: &str) {
        let mut out = Vec::new();
        push_numeric_reference(&mut out, ucs);
        assert_eq!(out, expected.as_bytes());
    }

    #[rstest]
    #[case(b"&#61504;tail", Some((61504, 8)))]
    #[case(b"&#1234567;", Some((1_234_567, 10)))]
    #[case(b"&#12345678;", None)]
    #[case(b"&#;", None)]
    #[case(b"&#12a;", None)]
    #[case(b"&#123", None)]
    #[case(b"&x", None)]
    fn numeric_reference_parsing(#[case] input: &[u8], #[case] expected: Option<(u32, usize)>) {
        assert_eq!(parse_numeric_reference(input), expected);
    }
}
