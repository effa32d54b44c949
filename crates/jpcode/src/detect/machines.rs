//! Byte-level recognisers, one deterministic automaton per encoding.
//!
//! Each machine is a list of 256-entry rows: `row[byte]` is the next state or
//! [`INVALID`]. Rows are assembled at compile time from byte ranges. State 0
//! is the start state and the only one in which the input may end.

use crate::Encoding;

/// Transition to a dead state.
pub(crate) const INVALID: u8 = 0x7F;

type Row = [u8; 256];

pub(crate) struct Machine {
    pub(crate) encoding: Encoding,
    pub(crate) rows: &'static [Row],
}

const fn dead() -> Row {
    [INVALID; 256]
}

/// `row` with every byte in `first..=last` leading to `next`.
const fn with(mut row: Row, first: u8, last: u8, next: u8) -> Row {
    let mut byte = first as usize;
    while byte <= last as usize {
        row[byte] = next;
        byte += 1;
    }
    row
}

const fn with_each(mut row: Row, bytes: &[u8], next: u8) -> Row {
    let mut i = 0;
    while i < bytes.len() {
        row[bytes[i] as usize] = next;
        i += 1;
    }
    row
}

/// 7-bit bytes back to state 0, `ESC` to the guard state `esc`.
const fn seven_bit(esc: u8) -> Row {
    with(with(dead(), 0x00, 0x7F, 0), 0x1B, 0x1B, esc)
}

/// Follows `ESC`: ISO-2022 designations (`ESC $`, `ESC (`) are rejected,
/// anything else 7-bit is an ordinary control sequence.
const fn escape_guard(esc: u8) -> Row {
    with_each(seven_bit(esc), b"$(", INVALID)
}

static ASCII: [Row; 2] = [seven_bit(1), escape_guard(1)];

// Shift-JIS: 0 base, 1 trail, 2 after ESC. Dialects append their own states.
const SJIS_TRAIL_STATE: u8 = 1;
const SJIS_ESC_STATE: u8 = 2;

const fn sjis_base() -> Row {
    let row = seven_bit(SJIS_ESC_STATE);
    let row = with(row, 0xA1, 0xDF, 0);
    let row = with(row, 0x81, 0x9F, SJIS_TRAIL_STATE);
    let row = with(row, 0xE0, 0xEF, SJIS_TRAIL_STATE);
    with(row, 0xFA, 0xFC, SJIS_TRAIL_STATE)
}

const fn sjis_trail() -> Row {
    with(with(dead(), 0x40, 0x7E, 0), 0x80, 0xFC, 0)
}

static SJIS: [Row; 3] = [sjis_base(), sjis_trail(), escape_guard(SJIS_ESC_STATE)];

// i-mode: 3 after 0xF8, 4 after 0xF9.
static IMODE: [Row; 5] = [
    with(with(sjis_base(), 0xF8, 0xF8, 3), 0xF9, 0xF9, 4),
    sjis_trail(),
    escape_guard(SJIS_ESC_STATE),
    with(dead(), 0x9F, 0xFC, 0),
    with(with(dead(), 0x40, 0x7E, 0), 0x80, 0xFC, 0),
];

// dot-i: 3..=7 after 0xF0..=0xF4. The 0xF4 row lists the assigned cells.
static DOTI: [Row; 8] = [
    with(sjis_base(), 0xF0, 0xF4, 3),
    sjis_trail(),
    escape_guard(SJIS_ESC_STATE),
    with(with(dead(), 0x40, 0x7E, 0), 0x80, 0xFC, 0),
    with(with(dead(), 0x40, 0x7E, 0), 0x80, 0xD6, 0),
    with(
        with(with(with(dead(), 0x40, 0x7E, 0), 0x80, 0xAB, 0), 0xB0, 0xD5, 0),
        0xDF,
        0xFC,
        0,
    ),
    with(with(dead(), 0x40, 0x7E, 0), 0x80, 0xFA, 0),
    doti_f4(),
];

const fn doti_f4() -> Row {
    let row = with(dead(), 0x40, 0x4F, 0);
    let row = with(row, 0x84, 0x8A, 0);
    let row = with(row, 0x8C, 0x8E, 0);
    let row = with(row, 0x94, 0x96, 0);
    let row = with(row, 0x98, 0x9C, 0);
    let row = with(row, 0xA0, 0xA4, 0);
    let row = with(row, 0xA8, 0xAF, 0);
    let row = with(row, 0xBC, 0xBE, 0);
    with_each(row, &[0x80, 0x90, 0xB4, 0xB5, 0xC4, 0xC5, 0xC8, 0xCC], 0)
}

// j-sky: 3 after `ESC $`, 4 inside the payload. `ESC $` must open a run.
static JSKY: [Row; 5] = [
    sjis_base(),
    sjis_trail(),
    with(escape_guard(SJIS_ESC_STATE), b'$', b'$', 3),
    with(dead(), b'E', b'G', 4),
    with(with(dead(), b'!', b'z', 4), 0x0F, 0x0F, 0),
];

// EUC-JP: 1-2 JIS X 0212 bytes, 3 kanji trail, 4 kana, 5 after ESC.
static EUCJP: [Row; 6] = [
    with(with(with(seven_bit(5), 0xA1, 0xFE, 3), 0x8E, 0x8E, 4), 0x8F, 0x8F, 1),
    with(dead(), 0xA1, 0xFE, 2),
    with(dead(), 0xA1, 0xFE, 0),
    with(dead(), 0xA1, 0xFE, 0),
    with(dead(), 0xA1, 0xDF, 0),
    escape_guard(5),
];

// ISO-2022-JP:
// 0 ASCII, 1 ESC, 2 ESC $, 3 ESC (, 4 double-byte first, 5 ESC $ (,
// 6 kana, 7 double-byte second.
static JIS: [Row; 8] = [
    seven_bit(1),
    with(with(dead(), b'$', b'$', 2), b'(', b'(', 3),
    with(with_each(dead(), b"B@", 4), b'(', b'(', 5),
    with(with_each(dead(), b"BJ", 0), b'I', b'I', 6),
    with(with(dead(), 0x21, 0x7E, 7), 0x1B, 0x1B, 1),
    with(dead(), b'D', b'D', 4),
    with(with(dead(), 0x21, 0x5F, 6), 0x1B, 0x1B, 1),
    with(dead(), 0x21, 0x7E, 4),
];

// UTF-8: state k expects k more continuation bytes.
static UTF8: [Row; 6] = [
    {
        let row = with(dead(), 0x00, 0x7F, 0);
        let row = with(row, 0xC0, 0xDF, 1);
        let row = with(row, 0xE0, 0xEF, 2);
        let row = with(row, 0xF0, 0xF7, 3);
        let row = with(row, 0xF8, 0xFB, 4);
        with(row, 0xFC, 0xFD, 5)
    },
    with(dead(), 0x80, 0xBF, 0),
    with(dead(), 0x80, 0xBF, 1),
    with(dead(), 0x80, 0xBF, 2),
    with(dead(), 0x80, 0xBF, 3),
    with(dead(), 0x80, 0xBF, 4),
];

// UTF-32: each unit is a zero byte, a plane byte up to 0x10 and two free bytes.
static UTF32BE: [Row; 4] = [
    with(dead(), 0x00, 0x00, 1),
    with(dead(), 0x00, 0x10, 2),
    with(dead(), 0x00, 0xFF, 3),
    with(dead(), 0x00, 0xFF, 0),
];

static UTF32LE: [Row; 4] = [
    with(dead(), 0x00, 0xFF, 1),
    with(dead(), 0x00, 0xFF, 2),
    with(dead(), 0x00, 0x10, 3),
    with(dead(), 0x00, 0x00, 0),
];

/// Every machine, in the order candidates are created.
pub(crate) static MACHINES: [Machine; 10] = [
    Machine {
        encoding: Encoding::Ascii,
        rows: &ASCII,
    },
    Machine {
        encoding: Encoding::EucJp,
        rows: &EUCJP,
    },
    Machine {
        encoding: Encoding::Sjis,
        rows: &SJIS,
    },
    Machine {
        encoding: Encoding::Jis,
        rows: &JIS,
    },
    Machine {
        encoding: Encoding::Utf8,
        rows: &UTF8,
    },
    Machine {
        encoding: Encoding::Utf32Be,
        rows: &UTF32BE,
    },
    Machine {
        encoding: Encoding::Utf32Le,
        rows: &UTF32LE,
    },
    Machine {
        encoding: Encoding::SjisJsky,
        rows: &JSKY,
    },
    Machine {
        encoding: Encoding::SjisImode,
        rows: &IMODE,
    },
    Machine {
        encoding: Encoding::SjisDoti,
        rows: &DOTI,
    },
];
