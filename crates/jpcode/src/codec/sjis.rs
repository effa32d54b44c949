//! Shift-JIS byte classes and the arithmetic that recentres double-byte codes
//! onto JIS X 0208 rows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SjisClass {
    /// ASCII and the unassigned bytes `0x80`, `0xA0`, `0xFD..=0xFF`.
    Through,
    /// Lead byte of a double-byte code.
    Lead,
    /// Half-width katakana.
    Kana,
}

pub(crate) const fn class(byte: u8) -> SjisClass {
    match byte {
        0x81..=0x9F | 0xE0..=0xFC => SjisClass::Lead,
        0xA1..=0xDF => SjisClass::Kana,
        _ => SjisClass::Through,
    }
}

pub(crate) const fn is_trail(byte: u8) -> bool {
    matches!(byte, 0x40..=0x7E | 0x80..=0xFC)
}

/// Double-byte Shift-JIS code to its EUC-JP pair. Strip the high bits for
/// ISO-2022-JP.
pub(crate) const fn to_euc(lead: u8, trail: u8) -> [u8; 2] {
    let doubled = lead.wrapping_mul(2);
    if trail >= 0x9F {
        [
            doubled.wrapping_sub(if lead >= 0xE0 { 0xE0 } else { 0x60 }),
            trail.wrapping_add(2),
        ]
    } else {
        [
            doubled.wrapping_sub(if lead >= 0xE0 { 0xE1 } else { 0x61 }),
            trail.wrapping_add(if trail < 0x7F { 0x61 } else { 0x60 }),
        ]
    }
}

/// EUC-JP pair (or 7-bit JIS pair with the high bits set) to Shift-JIS.
pub(crate) const fn from_euc(first: u8, second: u8) -> [u8; 2] {
    let row = first >> 1;
    if first & 1 == 1 {
        [
            row.wrapping_add(if first < 0xDF { 0x31 } else { 0x71 }),
            second.wrapping_sub(if second < 0xE0 { 0x61 } else { 0x60 }),
        ]
    } else {
        [
            row.wrapping_add(if first < 0xDF { 0x30 } else { 0x70 }),
            second.wrapping_sub(2),
        ]
    }
}
