//! Account matching policy.
//!
//! Brokerage exports usually mask account numbers, and users tend to type
//! only the last few digits (`--account "*1234"`). The policy decides how a
//! selector is compared against the stored identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// Marker users put in front of a partial account number.
const WILDCARD: char = '*';

/// How an account selector is compared with a holding's `account_id`.
///
/// All policies trim surrounding whitespace and compare ASCII
/// case-insensitively. A selector that is empty once trimmed (and, for the
/// partial policies, once leading `*` markers are removed) matches every
/// account.
///
/// # Examples
///
/// ```
/// use assetmix_core::types::AccountMatch;
///
/// assert!(AccountMatch::Suffix.matches("*1234", "Z12341234"));
/// assert!(!AccountMatch::Exact.matches("*1234", "Z12341234"));
/// assert!(AccountMatch::Contains.matches("2341", "Z12341234"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountMatch {
    /// Whole identifier must be equal.
    Exact,
    /// Selector, minus leading `*`, must be a suffix of the identifier.
    #[default]
    Suffix,
    /// Selector, minus leading `*`, may occur anywhere in the identifier.
    Contains,
}

impl AccountMatch {
    /// Returns all policies.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Exact, Self::Suffix, Self::Contains]
    }

    /// Returns the policy name used in configuration files.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Suffix => "suffix",
            Self::Contains => "contains",
        }
    }

    /// Returns true if `account_id` is selected by `selector`.
    #[must_use]
    pub fn matches(&self, selector: &str, account_id: &str) -> bool {
        let account = account_id.trim().to_ascii_uppercase();

        match self {
            Self::Exact => {
                let wanted = selector.trim().to_ascii_uppercase();
                wanted.is_empty() || wanted == account
            }
            Self::Suffix => {
                let wanted = strip_wildcards(selector);
                wanted.is_empty() || strip_wildcards(&account).ends_with(&wanted)
            }
            Self::Contains => {
                let wanted = strip_wildcards(selector);
                wanted.is_empty() || account.contains(&wanted)
            }
        }
    }
}

fn strip_wildcards(value: &str) -> String {
    value
        .trim()
        .trim_start_matches(WILDCARD)
        .trim()
        .to_ascii_uppercase()
}

impl fmt::Display for AccountMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AccountMatch {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|policy| policy.name() == lowered)
            .ok_or_else(|| AllocationError::UnknownMatchPolicy { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_suffix() {
        assert_eq!(AccountMatch::default(), AccountMatch::Suffix);
    }

    #[test]
    fn test_exact() {
        let policy = AccountMatch::Exact;
        assert!(policy.matches("*1234", " *1234 "));
        assert!(policy.matches("z1234", "Z1234"));
        assert!(!policy.matches("*1234", "Z12341234"));
        assert!(!policy.matches("1234", "*1234"));
    }

    #[test]
    fn test_suffix_against_masked_and_full_ids() {
        let policy = AccountMatch::Suffix;
        assert!(policy.matches("*1234", "*1234"));
        assert!(policy.matches("*1234", "Z12341234"));
        assert!(policy.matches("1234", "*1234"));
        assert!(policy.matches("**1234", "X991234"));
        assert!(!policy.matches("*1234", "Z12345678"));
        assert!(!policy.matches("*1234", "*4321"));
    }

    #[test]
    fn test_suffix_longer_than_masked_id() {
        // Only four digits are known for a masked account.
        assert!(!AccountMatch::Suffix.matches("*91234", "*1234"));
    }

    #[test]
    fn test_contains() {
        let policy = AccountMatch::Contains;
        assert!(policy.matches("*2341", "Z12341234"));
        assert!(policy.matches("roth", "ROTH IRA"));
        assert!(!policy.matches("9999", "Z12341234"));
    }

    #[test]
    fn test_bare_wildcard_matches_everything() {
        for policy in AccountMatch::all() {
            assert!(policy.matches("", "Z12341234"));
        }
        assert!(AccountMatch::Suffix.matches("*", "Z12341234"));
        assert!(AccountMatch::Contains.matches(" * ", "Z12341234"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("SUFFIX".parse::<AccountMatch>().unwrap(), AccountMatch::Suffix);
        assert_eq!(" exact ".parse::<AccountMatch>().unwrap(), AccountMatch::Exact);
        assert!(matches!(
            "glob".parse::<AccountMatch>(),
            Err(AllocationError::UnknownMatchPolicy { .. })
        ));
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&AccountMatch::Contains).unwrap();
        assert_eq!(json, "\"contains\"");
        let parsed: AccountMatch = serde_json::from_str("\"exact\"").unwrap();
        assert_eq!(parsed, AccountMatch::Exact);
    }
}
