//! Validated, read-only views over the conversion table resources.
//!
//! Two blobs are expected. The *unicode* blob holds the direct tables
//! between UCS-2 and Shift-JIS; the *emoji* blob holds one table pair per
//! carrier. Every table is a dense array of fixed-width entries, zero padded.
//! An entry whose bytes are all zero is unmapped.

use alloc::borrow::Cow;
use core::fmt;

use log::debug;

use crate::TableError;

mod builder;

pub use builder::TableBuilder;

/// Size of the unicode resource.
pub const UNICODE_TABLE_LEN: usize = 0x60000;
/// Size of the emoji resource.
pub const EMOJI_TABLE_LEN: usize = 0xB800;

/// First code point of the carrier emoji range in plane 15.
pub(crate) const EMOJI_BASE: u32 = 0xF_F000;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Region {
    pub(crate) name: &'static str,
    pub(crate) offset: usize,
    pub(crate) len: usize,
    pub(crate) width: usize,
}

impl Region {
    const fn new(name: &'static str, offset: usize, len: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            len,
            width,
        }
    }

    pub(crate) const fn entries(&self) -> usize {
        self.len / self.width
    }

    pub(crate) fn slot(&self, index: usize) -> Option<core::ops::Range<usize>> {
        (index < self.entries()).then(|| {
            let start = self.offset + index * self.width;
            start..start + self.width
        })
    }
}

pub(crate) const UCS2_TO_SJIS: Region = Region::new("ucs2->sjis", 0, 0x2_0000, 2);
pub(crate) const SJIS_TO_UTF8: Region = Region::new("sjis->utf8", 0x2_0000, 0x4_0000, 4);

/// A mobile carrier whose emoji extend Shift-JIS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    /// NTT DoCoMo i-mode: double-byte codes with leads `0xF8..=0xF9`.
    Imode,
    /// J-Phone j-sky: `ESC $ <E|F|G> ... SI` escape runs.
    Jsky,
    /// DDI Pocket dot-i: double-byte codes with leads `0xF0..=0xF4`.
    Doti,
}

impl Carrier {
    /// Table from plane-15 code points to the carrier's byte sequences.
    pub(crate) const fn encode_region(self) -> Region {
        match self {
            Self::Imode => Region::new("utf8->imode", 0x0000, 0x2000, 2),
            Self::Jsky => Region::new("utf8->jsky", 0x2800, 0x5000, 5),
            Self::Doti => Region::new("utf8->doti", 0x8400, 0x2000, 2),
        }
    }

    /// Table from the carrier's codes to UTF-8.
    pub(crate) const fn decode_region(self) -> Region {
        match self {
            Self::Imode => Region::new("imode->utf8", 0x2000, 0x800, 4),
            Self::Jsky => Region::new("jsky->utf8", 0x7800, 0xC00, 4),
            Self::Doti => Region::new("doti->utf8", 0xA400, 0x1400, 4),
        }
    }
}

/// A typed view over one table: fixed-width entries indexed from zero.
#[derive(Clone, Copy)]
pub struct TableView<'t> {
    bytes: &'t [u8],
    width: usize,
}

impl<'t> TableView<'t> {
    fn new(blob: &'t [u8], region: Region) -> Self {
        Self {
            bytes: &blob[region.offset..region.offset + region.len],
            width: region.width,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / self.width
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw, zero-padded entry at `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&'t [u8]> {
        let start = index.checked_mul(self.width)?;
        self.bytes.get(start..start + self.width)
    }

    /// The entry at `index` with its zero padding removed.
    ///
    /// Returns `None` when the index is out of range or the entry is
    /// unmapped.
    #[must_use]
    pub fn lookup(&self, index: usize) -> Option<&'t [u8]> {
        let entry = self.entry(index)?;
        let end = entry.iter().rposition(|&b| b != 0)?;
        Some(&entry[..=end])
    }
}

impl fmt::Debug for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("entries", &self.len())
            .field("width", &self.width)
            .finish()
    }
}

/// The complete, validated table set every Unicode conversion reads from.
///
/// The handle borrows its blobs when it can, so one mapped resource can back
/// any number of converters.
///
/// ```
/// use jpcode::{EMOJI_TABLE_LEN, LookupTables, TableError, UNICODE_TABLE_LEN};
///
/// let unicode = vec![0; UNICODE_TABLE_LEN];
/// let emoji = vec![0; EMOJI_TABLE_LEN];
/// assert!(LookupTables::new(&unicode[..], &emoji[..]).is_ok());
///
/// assert_eq!(
///     LookupTables::new(&unicode[..], Vec::new()).unwrap_err(),
///     TableError::Missing { table: "emoji" },
/// );
/// ```
#[derive(Clone)]
pub struct LookupTables<'a> {
    unicode: Cow<'a, [u8]>,
    emoji: Cow<'a, [u8]>,
}

impl<'a> LookupTables<'a> {
    /// Validates the two resource blobs.
    ///
    /// # Errors
    ///
    /// [`TableError::Missing`] for an empty blob and
    /// [`TableError::SizeMismatch`] for a blob of the wrong size.
    pub fn new(
        unicode: impl Into<Cow<'a, [u8]>>,
        emoji: impl Into<Cow<'a, [u8]>>,
    ) -> Result<Self, TableError> {
        let unicode = unicode.into();
        let emoji = emoji.into();
        check("unicode", &unicode, UNICODE_TABLE_LEN)?;
        check("emoji", &emoji, EMOJI_TABLE_LEN)?;
        debug!(
            "Validated lookup tables ({} + {} bytes)",
            unicode.len(),
            emoji.len()
        );
        Ok(Self { unicode, emoji })
    }

    /// Callers guarantee the blob sizes.
    pub(crate) fn from_parts(unicode: Cow<'a, [u8]>, emoji: Cow<'a, [u8]>) -> Self {
        debug_assert_eq!(unicode.len(), UNICODE_TABLE_LEN);
        debug_assert_eq!(emoji.len(), EMOJI_TABLE_LEN);
        Self { unicode, emoji }
    }

    /// Detaches the handle from borrowed blobs.
    #[must_use]
    pub fn into_owned(self) -> LookupTables<'static> {
        LookupTables {
            unicode: Cow::Owned(self.unicode.into_owned()),
            emoji: Cow::Owned(self.emoji.into_owned()),
        }
    }

    /// UCS-2 code unit to Shift-JIS bytes.
    #[must_use]
    pub fn ucs2_to_sjis(&self) -> TableView<'_> {
        TableView::new(&self.unicode, UCS2_TO_SJIS)
    }

    /// Shift-JIS code to UTF-8 bytes.
    #[must_use]
    pub fn sjis_to_utf8(&self) -> TableView<'_> {
        TableView::new(&self.unicode, SJIS_TO_UTF8)
    }

    /// Carrier code to UTF-8 bytes, indexed by `(group << 8) | byte`.
    #[must_use]
    pub fn carrier_to_utf8(&self, carrier: Carrier) -> TableView<'_> {
        TableView::new(&self.emoji, carrier.decode_region())
    }

    /// Plane-15 code point to carrier bytes, indexed by `ucs - 0xFF000`.
    #[must_use]
    pub fn utf8_to_carrier(&self, carrier: Carrier) -> TableView<'_> {
        TableView::new(&self.emoji, carrier.encode_region())
    }
}

impl fmt::Debug for LookupTables<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupTables")
            .field("unicode", &self.unicode.len())
            .field("emoji", &self.emoji.len())
            .finish()
    }
}

fn check(table: &'static str, blob: &[u8], expected: usize) -> Result<(), TableError> {
    match blob.len() {
        0 => Err(TableError::Missing { table }),
        found if found != expected => Err(TableError::SizeMismatch {
            table,
            expected,
            found,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    #[test]
    fn rejects_wrong_sizes() {
        let unicode = vec![0; UNICODE_TABLE_LEN];
        assert_eq!(
            LookupTables::new(Vec::new(), vec![0; EMOJI_TABLE_LEN]).unwrap_err(),
            TableError::Missing { table: "unicode" }
        );
        assert_eq!(
            LookupTables::new(&unicode[..], vec![0; 16]).unwrap_err(),
            TableError::SizeMismatch {
                table: "emoji",
                expected: EMOJI_TABLE_LEN,
                found: 16
            }
        );
    }

    #[test]
    fn regions_tile_the_emoji_blob() {
        let mut regions: Vec<Region> = [Carrier::Imode, Carrier::Jsky, Carrier::Doti]
            .into_iter()
            .flat_map(|c| [c.encode_region(), c.decode_region()])
            .collect();
        regions.sort_by_key(|r| r.offset);
        let end = regions.iter().fold(0, |offset, r| {
            assert_eq!(r.offset, offset, "{} is not contiguous", r.name);
            assert_eq!(r.len % r.width, 0);
            offset + r.len
        });
        assert_eq!(end, EMOJI_TABLE_LEN);
        assert_eq!(SJIS_TO_UTF8.offset + SJIS_TO_UTF8.len, UNICODE_TABLE_LEN);
    }

    #[test]
    fn lookup_trims_padding() {
        let mut unicode = vec![0; UNICODE_TABLE_LEN];
        let slot = SJIS_TO_UTF8.slot(0xB1).unwrap();
        unicode[slot.start..slot.start + 3].copy_from_slice("ｱ".as_bytes());
        let tables = LookupTables::new(unicode, vec![0; EMOJI_TABLE_LEN]).unwrap();

        let view = tables.sjis_to_utf8();
        assert_eq!(view.len(), 0x1_0000);
        assert_eq!(view.entry(0xB1), Some(&[0xEF, 0xBD, 0xB1, 0x00][..]));
        assert_eq!(view.lookup(0xB1), Some("ｱ".as_bytes()));
        assert_eq!(view.lookup(0xB2), None);
        assert_eq!(view.lookup(0x1_0000), None);
    }
}
