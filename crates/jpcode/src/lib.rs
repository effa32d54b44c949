//! Conversion between Japanese legacy encodings and UTF-8, with detection.
//!
//! The crate converts complete byte buffers between Shift-JIS, EUC-JP,
//! ISO-2022-JP, UCS-2 and UTF-8, round-trips the emoji dialects three mobile
//! carriers layered on Shift-JIS (i-mode, j-sky, dot-i), and guesses the
//! encoding of an arbitrary buffer.
//!
//! Conversions that go through Unicode need a [`LookupTables`] handle. The
//! tables are plain byte blobs supplied by the caller (typically a mapped
//! resource file) or assembled in memory with a [`TableBuilder`].
//!
//! ```
//! use jpcode::{ConvertOptions, Converter, Encoding, TableBuilder};
//!
//! let mut builder = TableBuilder::new();
//! builder.map_sjis(0x82A0, 'あ');
//! let tables = builder.build();
//!
//! let converter = Converter::new(&tables, ConvertOptions::default());
//! let utf8 = converter.convert(b"\xA4\xA2", Encoding::EucJp, Encoding::Utf8)?;
//! assert_eq!(utf8, "あ".as_bytes());
//!
//! assert_eq!(jpcode::detect(b"\x82\xA0"), Encoding::Sjis);
//! # Ok::<(), jpcode::ConvertError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod codec;
mod converter;
mod detect;
mod encoding;
mod error;
mod options;
mod tables;

#[cfg(test)]
mod tests;

pub use codec::{
    Dialect, eucjp_to_sjis, jis_to_sjis, sjis_to_eucjp, sjis_to_jis, ucs2_to_utf8, utf8_to_ucs2,
};
pub use converter::Converter;
pub use detect::{detect, detect_candidates};
pub use encoding::{Encoding, ParseEncodingError};
pub use error::{CodecError, ConvertError, Result, TableError};
pub use options::ConvertOptions;
pub use tables::{
    Carrier, EMOJI_TABLE_LEN, LookupTables, TableBuilder, TableView, UNICODE_TABLE_LEN,
};

#[cfg(feature = "fuzzing")]
#[doc(hidden)]
pub mod fuzzing {
    //! Internal entry points exercised by the fuzz targets.
    pub use crate::codec::{jsky::pack_jsky_escapes, parse_numeric_reference};
}
