//! Asset class classification for brokerage allocation exports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;
use crate::rollup::RollupBucket;

/// Raw asset class as reported by the brokerage allocation export.
///
/// The declaration order is the canonical display order and is also the
/// ordering used by every `BTreeMap<AssetClass, _>` in this crate.
///
/// # Examples
///
/// ```
/// use assetmix_core::types::AssetClass;
/// use assetmix_core::rollup::RollupBucket;
///
/// let class: AssetClass = "Short_term".parse().unwrap();
/// assert_eq!(class, AssetClass::ShortTerm);
/// assert_eq!(class.bucket(), RollupBucket::CashOrShortTerm);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// U.S. equities
    DomesticStock,
    /// Non-U.S. equities
    ForeignStock,
    /// Fixed income
    Bonds,
    /// Money market, CDs and other short-term instruments
    ShortTerm,
    /// Holdings the brokerage could not classify
    Unknown,
    /// Classified, but outside the main categories
    Other,
    /// Convertible securities
    Convertibles,
    /// Preferred stock
    Preferred,
}

impl AssetClass {
    /// Returns all asset classes in canonical order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::DomesticStock,
            Self::ForeignStock,
            Self::Bonds,
            Self::ShortTerm,
            Self::Unknown,
            Self::Other,
            Self::Convertibles,
            Self::Preferred,
        ]
    }

    /// Returns the machine name (`domestic_stock`, `short_term`, ...).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DomesticStock => "domestic_stock",
            Self::ForeignStock => "foreign_stock",
            Self::Bonds => "bonds",
            Self::ShortTerm => "short_term",
            Self::Unknown => "unknown",
            Self::Other => "other",
            Self::Convertibles => "convertibles",
            Self::Preferred => "preferred",
        }
    }

    /// Returns the column label used by the export.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::DomesticStock => "Domestic Stock",
            Self::ForeignStock => "Foreign Stock",
            Self::Bonds => "Bonds",
            Self::ShortTerm => "Short_term",
            Self::Unknown => "Unknown",
            Self::Other => "Other",
            Self::Convertibles => "Convertibles",
            Self::Preferred => "Preferred",
        }
    }

    /// Returns the rollup bucket this class belongs to.
    #[must_use]
    pub fn bucket(&self) -> RollupBucket {
        match self {
            Self::DomesticStock | Self::ForeignStock => RollupBucket::Stock,
            Self::Bonds | Self::ShortTerm => RollupBucket::CashOrShortTerm,
            Self::Unknown | Self::Other | Self::Convertibles | Self::Preferred => {
                RollupBucket::Other
            }
        }
    }

    /// Parses a column header or machine name.
    ///
    /// Matching ignores case, surrounding whitespace, and treats spaces and
    /// hyphens like underscores, so `"Short Term"`, `"short-term"` and
    /// `"Short_term"` are all [`AssetClass::ShortTerm`].
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let normalized: String = header
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Self::all()
            .iter()
            .copied()
            .find(|class| class.name() == normalized)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AssetClass {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_header(s).ok_or_else(|| AllocationError::unknown_asset_class(s))
    }
}
