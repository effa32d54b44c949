//! j-sky emoji escapes: `ESC $ <designator> <payload>... SI`.
//!
//! The designator (`E`, `F` or `G`) selects a 256-entry group of the carrier
//! table and each payload byte in `'!'..='z'` names one emoji of that group.

use alloc::vec::Vec;

use bstr::ByteSlice;
use log::trace;

use super::{ESC, SI};

const DESIGNATORS: core::ops::RangeInclusive<u8> = b'E'..=b'G';
const PAYLOAD: core::ops::RangeInclusive<u8> = b'!'..=b'z';

/// A terminated escape run at the head of a buffer.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct EscapeRun<'a> {
    /// Designator offset from `E`.
    pub(crate) group: u8,
    pub(crate) payload: &'a [u8],
    /// Bytes consumed, including `ESC $`, the designator and `SI`.
    pub(crate) len: usize,
}

/// Parses an escape run at the start of `input`. `None` when the header is
/// wrong or `SI` never follows the payload.
pub(crate) fn parse_run(input: &[u8]) -> Option<EscapeRun<'_>> {
    let [ESC, b'$', designator, ref tail @ ..] = *input else {
        return None;
    };
    if !DESIGNATORS.contains(&designator) {
        return None;
    }
    let payload_len = tail
        .iter()
        .position(|b| !PAYLOAD.contains(b))
        .unwrap_or(tail.len());
    (tail.get(payload_len) == Some(&SI)).then(|| EscapeRun {
        group: designator - DESIGNATORS.start(),
        payload: &tail[..payload_len],
        len: 3 + payload_len + 1,
    })
}

/// A single-emoji escape `ESC $ d p SI` at the start of `input`.
fn single(input: &[u8]) -> Option<(u8, u8)> {
    match *input {
        [ESC, b'$', designator, payload, SI, ..]
            if DESIGNATORS.contains(&designator) && PAYLOAD.contains(&payload) =>
        {
            Some((designator, payload))
        }
        _ => None,
    }
}

/// Merges consecutive single-emoji escapes that share a designator into one
/// run. Everything else is copied unchanged.
#[must_use]
pub fn pack_jsky_escapes(encoded: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded.len());
    let mut rest = encoded;
    while !rest.is_empty() {
        if let Some((designator, payload)) = single(rest) {
            out.extend_from_slice(&[ESC, b'$', designator, payload]);
            rest = &rest[5..];
            while let Some((next, payload)) = single(rest) {
                if next != designator {
                    break;
                }
                out.push(payload);
                rest = &rest[5..];
            }
            out.push(SI);
        } else {
            let literal = rest[1..].find_byte(ESC).map_or(rest.len(), |at| at + 1);
            out.extend_from_slice(&rest[..literal]);
            rest = &rest[literal..];
        }
    }
    trace!("Packed j-sky escapes: {} -> {} bytes", encoded.len(), out.len());
    out
}
