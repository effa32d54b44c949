
#[cfg(feature = "serde")]
mod serde_names;
