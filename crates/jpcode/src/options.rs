/// Configuration for a [`Converter`](crate::Converter).
///
/// # Examples
///
/// ```rust
/// use jpcode::{ConvertOptions, Converter, TableBuilder};
///
/// let tables = TableBuilder::new().build();
/// let converter = Converter::new(
///     &tables,
///     ConvertOptions {
///         numeric_references: false,
///         ..Default::default()
///     },
/// );
/// assert_eq!(converter.utf8_to_sjis("€".as_bytes()), b"?");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertOptions {
    /// Whether j-sky output merges consecutive single-emoji escapes that use
    /// the same designator into one escape run.
    ///
    /// `ESC $ G ! SI ESC $ G " SI` becomes `ESC $ G ! " SI`.
    ///
    /// # Default
    ///
    /// `true`
    pub pack_jsky_escapes: bool,

    /// Whether standard UTF-8 to Shift-JIS conversion writes characters it
    /// cannot map as decimal references (`&#8364;`).
    ///
    /// When `false` such characters become `?`. Carrier dialects always use
    /// `?`.
    ///
    /// # Default
    ///
    /// `true`
    pub numeric_references: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pack_jsky_escapes: true,
            numeric_references: true,
        }
    }
}
