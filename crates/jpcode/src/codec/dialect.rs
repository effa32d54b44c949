use core::ops::RangeInclusive;

use crate::tables::Carrier;

/// A Shift-JIS flavour: the base codec or one carrier's emoji extension.
///
/// Each dialect is a set of rules layered on the same Shift-JIS and UTF-8
/// transcoder. Carrier emoji travel through Unicode as plane-15 private-use
/// code points (`U+FF000..=U+FFFFF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Plain Shift-JIS.
    #[default]
    Standard,
    /// i-mode emoji as double-byte codes with leads `0xF8..=0xF9`.
    Imode,
    /// j-sky emoji as `ESC $ <E|F|G> <payload> SI` runs.
    Jsky,
    /// dot-i emoji as double-byte codes with leads `0xF0..=0xF4`, also
    /// written as decimal references `&#61504;`.
    Doti,
}

/// What a dialect writes for a code point it cannot map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fallback {
    /// `&#N;`, or `?` for plane 15.
    NumericReference,
    Placeholder,
}

/// The rules a [`Dialect`] applies on top of the base codec.
#[derive(Debug, Clone)]
pub(crate) struct Profile {
    pub(crate) carrier: Option<Carrier>,
    /// Leads whose double-byte codes index the carrier table first.
    pub(crate) emoji_leads: Option<RangeInclusive<u8>>,
    /// Shift-JIS carries emoji as escape runs.
    pub(crate) escape_runs: bool,
    /// Decimal references in this range denote emoji.
    pub(crate) emoji_references: Option<RangeInclusive<u32>>,
    pub(crate) fallback: Fallback,
}

impl Dialect {
    pub(crate) const fn carrier(self) -> Option<Carrier> {
        match self {
            Self::Standard => None,
            Self::Imode => Some(Carrier::Imode),
            Self::Jsky => Some(Carrier::Jsky),
            Self::Doti => Some(Carrier::Doti),
        }
    }

    pub(crate) fn profile(self) -> Profile {
        let base = Profile {
            carrier: self.carrier(),
            emoji_leads: None,
            escape_runs: false,
            emoji_references: None,
            fallback: Fallback::Placeholder,
        };
        match self {
            Self::Standard => Profile {
                fallback: Fallback::NumericReference,
                ..base
            },
            Self::Imode => Profile {
                emoji_leads: Some(0xF8..=0xF9),
                ..base
            },
            Self::Jsky => Profile {
                escape_runs: true,
                ..base
            },
            Self::Doti => Profile {
                emoji_leads: Some(0xF0..=0xF4),
                emoji_references: Some(0xF000..=0xF4FF),
                ..base
            },
        }
    }
}

impl Profile {
    /// Carrier-table index of a double-byte emoji code.
    pub(crate) fn emoji_index(&self, lead: u8, trail: u8) -> Option<usize> {
        let leads = self.emoji_leads.as_ref()?;
        leads
            .contains(&lead)
            .then(|| usize::from(lead - leads.start()) << 8 | usize::from(trail))
    }
}
