#![allow(missing_docs)]

use core::fmt::Write;

use jpcode::{Carrier, LookupTables, TableBuilder};

/// Kana, kanji and one emoji per carrier, three for j-sky.
pub fn tables() -> LookupTables<'static> {
    let mut builder = TableBuilder::new();
    builder
        .map_sjis(0x82A0, 'あ')
        .map_sjis(0x8ABF, '漢')
        .map_sjis(0xB1, 'ｱ');
    builder
        .map_emoji(Carrier::Imode, 0xF89F, '\u{FF89F}')
        .and_then(|b| b.map_emoji(Carrier::Doti, 0xF040, '\u{FF040}'))
        .and_then(|b| b.map_emoji(Carrier::Jsky, 0x4721, '\u{FFB41}'))
        .and_then(|b| b.map_emoji(Carrier::Jsky, 0x4722, '\u{FFB42}'))
        .and_then(|b| b.map_emoji(Carrier::Jsky, 0x4521, '\u{FF941}'))
        .expect("emoji codes fit their carriers");
    builder.build()
}

/// Bytes as an escaped ASCII string, one line per conversion.
pub fn escaped(bytes: &[u8]) -> String {
    let mut out = String::new();
    write!(out, "{}", bytes.escape_ascii()).unwrap();
    out
}
