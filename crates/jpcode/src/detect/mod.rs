//! Encoding detection by running every recogniser over the input in
//! lock-step.

use alloc::vec::Vec;

use log::trace;

use crate::Encoding;

mod machines;

use machines::{INVALID, MACHINES, Machine};

/// Order in which surviving candidates are preferred.
const PRIORITY: [Encoding; 10] = [
    Encoding::Utf32Be,
    Encoding::Utf32Le,
    Encoding::Ascii,
    Encoding::Jis,
    Encoding::EucJp,
    Encoding::Sjis,
    Encoding::SjisJsky,
    Encoding::SjisImode,
    Encoding::SjisDoti,
    Encoding::Utf8,
];

/// One hypothesis about the input, advanced byte by byte.
struct Candidate {
    machine: &'static Machine,
    state: u8,
    alive: bool,
}

impl Candidate {
    fn new(machine: &'static Machine) -> Self {
        Self {
            machine,
            state: 0,
            alive: true,
        }
    }

    /// Feeds one byte; returns whether the candidate is still alive.
    fn advance(&mut self, byte: u8) -> bool {
        let next = self.machine.rows[usize::from(self.state)][usize::from(byte)];
        if next == INVALID {
            self.alive = false;
        } else {
            self.state = next;
        }
        self.alive
    }

    fn accepts(&self) -> bool {
        self.alive && self.state == 0
    }
}

fn byte_order_mark(input: &[u8]) -> Option<Encoding> {
    if input.len() % 4 == 0
        && (input.starts_with(b"\x00\x00\xFE\xFF") || input.starts_with(b"\xFF\xFE\x00\x00"))
    {
        Some(Encoding::Utf32)
    } else if input.len() % 2 == 0
        && (input.starts_with(b"\xFE\xFF") || input.starts_with(b"\xFF\xFE"))
    {
        Some(Encoding::Utf16)
    } else {
        None
    }
}

/// Every encoding the input is well-formed in, most probable first.
///
/// Byte-order marks short-circuit to a single answer. An empty input fits
/// nothing.
///
/// ```
/// use jpcode::{Encoding, detect_candidates};
///
/// assert_eq!(
///     detect_candidates(b"\xA4\xA2"),
///     [
///         Encoding::EucJp,
///         Encoding::Sjis,
///         Encoding::SjisJsky,
///         Encoding::SjisImode,
///         Encoding::SjisDoti,
///     ]
/// );
/// ```
#[must_use]
pub fn detect_candidates(input: &[u8]) -> Vec<Encoding> {
    if input.is_empty() {
        return Vec::new();
    }
    if let Some(encoding) = byte_order_mark(input) {
        trace!("Detected {encoding} from its byte-order mark");
        return alloc::vec![encoding];
    }

    let mut candidates: Vec<Candidate> = MACHINES.iter().map(Candidate::new).collect();
    let mut alive = candidates.len();
    for &byte in input {
        for candidate in candidates.iter_mut().filter(|c| c.alive) {
            if !candidate.advance(byte) {
                alive -= 1;
            }
        }
        if alive == 0 {
            trace!("Every candidate rejected the input");
            return Vec::new();
        }
    }

    let survivors: Vec<Encoding> = PRIORITY
        .into_iter()
        .filter(|&encoding| {
            candidates
                .iter()
                .any(|c| c.machine.encoding == encoding && c.accepts())
        })
        .collect();
    trace!("Detection survivors for {} bytes: {survivors:?}", input.len());
    survivors
}

/// The most probable encoding of `input`, or [`Encoding::Unknown`].
///
/// Ties between encodings that all fit are broken by a fixed priority:
/// UTF-32 (big then little endian), ASCII, ISO-2022-JP, EUC-JP, Shift-JIS,
/// the j-sky, i-mode and dot-i dialects, and UTF-8 last.
/// [`Encoding::Utf16`] and [`Encoding::Utf32`] come only from a byte-order
/// mark.
///
/// ```
/// use jpcode::{Encoding, detect};
///
/// assert_eq!(detect(b""), Encoding::Unknown);
/// assert_eq!(detect(b"plain text"), Encoding::Ascii);
/// assert_eq!(detect(b"\x1b$B4A\x1b(B"), Encoding::Jis);
/// assert_eq!(detect("日本語".as_bytes()), Encoding::Utf8);
/// ```
#[must_use]
pub fn detect(input: &[u8]) -> Encoding {
    let encoding = detect_candidates(input)
        .first()
        .copied()
        .unwrap_or(Encoding::Unknown);
    trace!("Detected {encoding}");
    encoding
}
