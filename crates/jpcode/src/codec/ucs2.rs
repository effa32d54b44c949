use alloc::vec::Vec;

use log::trace;

use super::{PLACEHOLDER, utf8};
use crate::CodecError;

/// Big-endian UCS-2 to UTF-8.
///
/// # Errors
///
/// [`CodecError::OddLength`] when the input is not a whole number of code
/// units.
///
/// ```
/// assert_eq!(jpcode::ucs2_to_utf8(b"\x30\x42\x00a")?, "あa".as_bytes());
/// assert!(jpcode::ucs2_to_utf8(b"\x30").is_err());
/// # Ok::<(), jpcode::CodecError>(())
/// ```
pub fn ucs2_to_utf8(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    if input.len() % 2 != 0 {
        return Err(CodecError::OddLength(input.len()));
    }
    let mut out = Vec::with_capacity(input.len() * 3 / 2);
    for unit in input.chunks_exact(2) {
        utf8::push_bmp(&mut out, u16::from_be_bytes([unit[0], unit[1]]));
    }
    trace!("ucs2->utf8: {} -> {} bytes", input.len(), out.len());
    Ok(out)
}

/// UTF-8 to big-endian UCS-2.
///
/// A malformed sequence yields its lead byte as a code unit (`0x00 <lead>`)
/// and costs one byte; code points beyond the BMP become `?`.
#[must_use]
pub fn utf8_to_ucs2(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut rest = input;
    while let [lead, ..] = *rest {
        let (unit, consumed) = match utf8::decode(rest) {
            Some((ucs, len)) => (u16::try_from(ucs).unwrap_or(u16::from(PLACEHOLDER)), len),
            None => (u16::from(lead), 1),
        };
        out.extend_from_slice(&unit.to_be_bytes());
        rest = &rest[consumed..];
    }
    trace!("utf8->ucs2: {} -> {} bytes", input.len(), out.len());
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"", b"")]
    #[case(b"\x00A\x00\xA2", "A¢".as_bytes())]
    #[case(b"\x30\x42\xFF\x71", "あｱ".as_bytes())]
    #[case(b"\xD8\x3D\xDE\x00", b"\xED\xA0\xBD\xED\xB8\x80")]
    fn encodes_code_units(#[case] ucs2: &[u8], #[case] utf8: &[u8]) {
        assert_eq!(ucs2_to_utf8(ucs2).unwrap(), utf8);
    }

    #[test]
    fn odd_length_is_rejected() {
        assert_eq!(ucs2_to_utf8(b"\x00A\x00"), Err(CodecError::OddLength(3)));
    }

    #[rstest]
    #[case("aあ".as_bytes(), b"\x00a\x30\x42")]
    #[case("😀".as_bytes(), b"\x00?")]
    #[case(b"\xE3\x81", b"\x00\xE3\x00\x81")]
    #[case(b"\xFF", b"\x00\xFF")]
    #[case(b"\xF8\x88\x80\x80\x80", b"\x00?")]
    fn decodes_to_code_units(#[case] utf8: &[u8], #[case] ucs2: &[u8]) {
        assert_eq!(utf8_to_ucs2(utf8), ucs2);
    }
}
