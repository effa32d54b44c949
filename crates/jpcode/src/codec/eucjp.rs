use alloc::vec::Vec;

use log::trace;

use super::{
    UNDEFINED_SJIS,
    sjis::{SjisClass, class, from_euc, is_trail, to_euc},
};

const SS2: u8 = 0x8E;
const SS3: u8 = 0x8F;

/// EUC-JP to Shift-JIS.
///
/// JIS X 0212 characters (`0x8F` triples) have no Shift-JIS form and become
/// `0x81 0xAC`. Malformed units pass through one byte at a time.
///
/// ```
/// assert_eq!(jpcode::eucjp_to_sjis(b"a\xA4\xA2\x8E\xB1"), b"a\x82\xA0\xB1");
/// ```
#[must_use]
pub fn eucjp_to_sjis(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut rest = input;
    while !rest.is_empty() {
        let consumed = match *rest {
            [SS3, _, _, ..] => {
                out.extend_from_slice(&UNDEFINED_SJIS);
                3
            }
            [first @ 0xA1..=0xFE, second @ 0xA1..=0xFE, ..] => {
                out.extend_from_slice(&from_euc(first, second));
                2
            }
            [SS2, kana @ 0xA1..=0xDF, ..] => {
                out.push(kana);
                2
            }
            [byte, ..] => {
                out.push(byte);
                1
            }
            [] => break,
        };
        rest = &rest[consumed..];
    }
    trace!("eucjp->sjis: {} -> {} bytes", input.len(), out.len());
    out
}

/// Shift-JIS to EUC-JP.
///
/// Half-width katakana gain the `0x8E` prefix. A lead byte without a valid
/// trail and bytes Shift-JIS leaves unassigned pass through unchanged.
///
/// ```
/// assert_eq!(jpcode::sjis_to_eucjp(b"a\x82\xA0\xB1"), b"a\xA4\xA2\x8E\xB1");
/// ```
#[must_use]
pub fn sjis_to_eucjp(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 4);
    let mut rest = input;
    while let [lead, ..] = *rest {
        let consumed = match (class(lead), rest.get(1)) {
            (SjisClass::Lead, Some(&trail)) if is_trail(trail) => {
                out.extend_from_slice(&to_euc(lead, trail));
                2
            }
            (SjisClass::Kana, _) => {
                out.extend_from_slice(&[SS2, lead]);
                1
            }
            _ => {
                out.push(lead);
                1
            }
        };
        rest = &rest[consumed..];
    }
    trace!("sjis->eucjp: {} -> {} bytes", input.len(), out.len());
    out
}
