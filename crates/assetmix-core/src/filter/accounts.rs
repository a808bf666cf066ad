//! Account selection and listing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AccountMatch, Holding};

/// Returns the holdings selected by `account_selector` using the default
/// [`AccountMatch::Suffix`] policy.
///
/// With no selector all holdings are returned in their original order.
#[must_use]
pub fn filter(holdings: &[Holding], account_selector: Option<&str>) -> Vec<Holding> {
    filter_by_account(holdings, account_selector, AccountMatch::default())
}

/// Returns the holdings selected by `account_selector` under `policy`.
///
/// Order is preserved. An unmatched selector gives an empty vector.
///
/// # Example
///
/// ```rust,ignore
/// let roth = filter_by_account(&holdings, Some("*1234"), AccountMatch::Suffix);
/// ```
#[must_use]
pub fn filter_by_account(
    holdings: &[Holding],
    account_selector: Option<&str>,
    policy: AccountMatch,
) -> Vec<Holding> {
    let Some(selector) = account_selector else {
        return holdings.to_vec();
    };

    let selected: Vec<Holding> = holdings
        .iter()
        .filter(|h| policy.matches(selector, &h.account_id))
        .cloned()
        .collect();

    debug!(
        selector,
        policy = %policy,
        matched = selected.len(),
        total = holdings.len(),
        "filtered holdings by account"
    );

    selected
}

/// Number of holdings carried by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account identifier as it appears in the export.
    pub account_id: String,

    /// Holding rows attributed to the account.
    pub holding_count: usize,
}

/// Lists distinct accounts in first-seen order with their holding counts.
///
/// Holdings with a blank account identifier are not listed.
#[must_use]
pub fn list_accounts(holdings: &[Holding]) -> Vec<AccountSummary> {
    let mut accounts: Vec<AccountSummary> = Vec::new();

    for holding in holdings {
        let id = holding.account_id.trim();
        if id.is_empty() {
            continue;
        }
        match accounts.iter_mut().find(|a| a.account_id == id) {
            Some(existing) => existing.holding_count += 1,
            None => accounts.push(AccountSummary {
                account_id: id.to_string(),
                holding_count: 1,
            }),
        }
    }

    accounts
}
