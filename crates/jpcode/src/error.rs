use thiserror::Error;

use crate::Encoding;

/// Convenience alias for conversions that can fail.
pub type Result<T, E = ConvertError> = core::result::Result<T, E>;

/// A table resource is unusable, or a mapping does not fit its table.
///
/// Loading failures are fatal: no conversion can run without a validated
/// table set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The blob is empty.
    #[error("{table} table resource is missing")]
    Missing {
        /// Name of the resource.
        table: &'static str,
    },
    /// The blob does not have the size of the resource layout.
    #[error("{table} table resource has {found:#x} bytes, expected {expected:#x}")]
    SizeMismatch {
        /// Name of the resource.
        table: &'static str,
        /// Size required by the layout.
        expected: usize,
        /// Size of the supplied blob.
        found: usize,
    },
    /// A mapping added through [`TableBuilder`](crate::TableBuilder) falls
    /// outside the indexable range of its table.
    #[error("{table} table has no slot for {code:#x}")]
    OutOfRange {
        /// Name of the table.
        table: &'static str,
        /// The offending code.
        code: u32,
    },
}

/// Structural failure of a codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// UCS-2 input must consist of whole 16-bit code units.
    #[error("UCS-2 input has odd length {0}")]
    OddLength(usize),
}

/// Failure of a [`Converter`](crate::Converter) call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The encoding can be detected but not converted.
    #[error("conversion from or to {0} is not supported")]
    Unsupported(Encoding),
    /// The underlying codec rejected the input.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
