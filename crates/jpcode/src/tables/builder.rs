use alloc::{borrow::Cow, vec, vec::Vec};

use log::debug;

use super::{
    Carrier, EMOJI_BASE, EMOJI_TABLE_LEN, LookupTables, Region, SJIS_TO_UTF8, UCS2_TO_SJIS,
    UNICODE_TABLE_LEN,
};
use crate::{
    TableError,
    codec::{ESC, SI},
};

/// Assembles a table set in memory, starting from all-unmapped tables.
///
/// ```
/// use jpcode::{Carrier, TableBuilder};
///
/// let mut builder = TableBuilder::new();
/// builder
///     .map_sjis(0x82A0, 'あ')
///     .map_sjis(0xB1, 'ｱ');
/// builder.map_emoji(Carrier::Imode, 0xF89F, '\u{FF89F}')?;
/// let tables = builder.build();
///
/// assert_eq!(tables.sjis_to_utf8().lookup(0x82A0), Some("あ".as_bytes()));
/// assert_eq!(tables.ucs2_to_sjis().lookup(0xFF71), Some(&[0xB1][..]));
/// # Ok::<(), jpcode::TableError>(())
/// ```
#[derive(Clone)]
pub struct TableBuilder {
    unicode: Vec<u8>,
    emoji: Vec<u8>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// A builder with every entry unmapped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            unicode: vec![0; UNICODE_TABLE_LEN],
            emoji: vec![0; EMOJI_TABLE_LEN],
        }
    }

    /// Maps the Shift-JIS `code` to `ch` in both directions.
    ///
    /// Codes up to `0xFF` are single bytes. When several codes map to one
    /// character the first one added is kept for the reverse direction.
    /// Characters outside the BMP are only mapped forward.
    pub fn map_sjis(&mut self, code: u16, ch: char) -> &mut Self {
        let mut utf8 = [0; 4];
        ch.encode_utf8(&mut utf8);
        if let Some(slot) = SJIS_TO_UTF8.slot(usize::from(code)) {
            self.unicode[slot].copy_from_slice(&utf8);
        }

        if let Some(slot) = u16::try_from(u32::from(ch))
            .ok()
            .and_then(|unit| UCS2_TO_SJIS.slot(usize::from(unit)))
        {
            let sjis = match u8::try_from(code) {
                Ok(single) => [single, 0],
                Err(_) => code.to_be_bytes(),
            };
            let entry = &mut self.unicode[slot];
            if entry.iter().all(|&b| b == 0) {
                entry.copy_from_slice(&sjis);
            }
        }
        self
    }

    /// Maps a carrier emoji `code` to the plane-15 character `ch`, both ways.
    ///
    /// i-mode and dot-i codes are the double-byte Shift-JIS code, such as
    /// `0xF89F`. j-sky codes pack the escape designator and payload byte, so
    /// `0x4721` stands for `ESC $ G ! SI`.
    ///
    /// # Errors
    ///
    /// [`TableError::OutOfRange`] when `code` has no slot in the carrier
    /// table or `ch` lies outside `U+FF000..=U+FFFFF`.
    pub fn map_emoji(
        &mut self,
        carrier: Carrier,
        code: u16,
        ch: char,
    ) -> Result<&mut Self, TableError> {
        let [group, byte] = code.to_be_bytes();
        let first_group = match carrier {
            Carrier::Imode => 0xF8,
            Carrier::Jsky => b'E',
            Carrier::Doti => 0xF0,
        };
        let decode = carrier.decode_region();
        let forward = group
            .checked_sub(first_group)
            .and_then(|g| decode.slot(usize::from(g) << 8 | usize::from(byte)))
            .ok_or(out_of_range(decode, u32::from(code)))?;

        let encode = carrier.encode_region();
        let reverse = u32::from(ch)
            .checked_sub(EMOJI_BASE)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| encode.slot(offset))
            .ok_or(out_of_range(encode, u32::from(ch)))?;

        let mut utf8 = [0; 4];
        ch.encode_utf8(&mut utf8);
        self.emoji[forward].copy_from_slice(&utf8);
        match carrier {
            Carrier::Jsky => self.emoji[reverse].copy_from_slice(&[ESC, b'$', group, byte, SI]),
            Carrier::Imode | Carrier::Doti => self.emoji[reverse].copy_from_slice(&[group, byte]),
        }
        Ok(self)
    }

    /// A validated table set holding a copy of the current mappings.
    #[must_use]
    pub fn build(&self) -> LookupTables<'static> {
        debug!("Built lookup tables in memory");
        LookupTables::from_parts(
            Cow::Owned(self.unicode.clone()),
            Cow::Owned(self.emoji.clone()),
        )
    }

    /// A builder seeded with the WHATWG Shift_JIS index: kana and every
    /// double-byte code the index decodes. Carrier tables stay empty.
    #[cfg(any(test, feature = "encoding_rs"))]
    #[must_use]
    pub fn shift_jis() -> Self {
        let mut builder = Self::new();
        let kana = (0xA1..=0xDF_u8).map(|byte| (u16::from(byte), single_char(&[byte])));
        let double = (0x81..=0x9F)
            .chain(0xE0..=0xFC)
            .flat_map(|lead: u16| (0x40..=0x7E).chain(0x80..=0xFC).map(move |trail| lead << 8 | trail))
            .map(|code| (code, single_char(&code.to_be_bytes())));

        let mut mapped = 0usize;
        for (code, ch) in kana.chain(double) {
            if let Some(ch) = ch {
                builder.map_sjis(code, ch);
                mapped += 1;
            }
        }
        debug!("Seeded {mapped} Shift_JIS mappings from the WHATWG index");
        builder
    }
}

fn out_of_range(region: Region, code: u32) -> TableError {
    TableError::OutOfRange {
        table: region.name,
        code,
    }
}

#[cfg(any(test, feature = "encoding_rs"))]
fn single_char(bytes: &[u8]) -> Option<char> {
    let text = encoding_rs::SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
