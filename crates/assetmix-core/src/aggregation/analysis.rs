//! Full allocation analysis pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{aggregate, aggregate_excluding, AggregationResult};
use crate::filter::filter_by_account;
use crate::rollup::Rollup;
use crate::types::{AllocationConfig, Holding};

/// The four result objects of one run, plus the selector that produced them.
///
/// Carries every number a presenter needs; nothing has to be re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationAnalysis {
    /// Account selector used for filtering, if any.
    pub account_selector: Option<String>,

    /// Aggregation over all selected holdings.
    pub all_holdings: AggregationResult,

    /// Rollup of [`Self::all_holdings`].
    pub all_holdings_rollup: Rollup,

    /// Aggregation after removing the configured cash symbols.
    pub excluding_cash: AggregationResult,

    /// Rollup of [`Self::excluding_cash`].
    pub excluding_cash_rollup: Rollup,
}

/// Runs account filter, both aggregations and both rollups.
///
/// # Arguments
///
/// * `holdings` - Every holding loaded from the export
/// * `account_selector` - Optional account to restrict the analysis to
/// * `config` - Cash symbols and account match policy
#[must_use]
pub fn analyze(
    holdings: &[Holding],
    account_selector: Option<&str>,
    config: &AllocationConfig,
) -> AllocationAnalysis {
    let selected = filter_by_account(holdings, account_selector, config.account_match);

    let all_holdings = aggregate(&selected);
    let excluding_cash = aggregate_excluding(&selected, &config.cash_symbols);

    debug!(
        selected = selected.len(),
        cash_symbols = config.cash_symbols.len(),
        "allocation analysis complete"
    );

    AllocationAnalysis {
        account_selector: account_selector.map(str::to_string),
        all_holdings_rollup: all_holdings.rollup(),
        excluding_cash_rollup: excluding_cash.rollup(),
        all_holdings,
        excluding_cash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollup::RollupBucket;
    use crate::types::{AccountMatch, AssetClass};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn holdings() -> Vec<Holding> {
        vec![
            Holding::builder()
                .symbol("FXAIX")
                .account("Z11111234")
                .allocation(AssetClass::DomesticStock, dec!(300_000))
                .build()
                .unwrap(),
            Holding::builder()
                .symbol("SPAXX**")
                .account("Z11111234")
                .allocation(AssetClass::ShortTerm, dec!(100_000))
                .build()
                .unwrap(),
            Holding::builder()
                .symbol("FSPSX")
                .account("Z22225678")
                .allocation(AssetClass::ForeignStock, dec!(100_000))
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn test_pipeline_all_accounts() {
        let config = AllocationConfig::new().with_cash_symbols(["SPAXX**"]);
        let analysis = analyze(&holdings(), None, &config);

        assert_eq!(analysis.account_selector, None);
        assert_eq!(analysis.all_holdings.grand_total, dec!(500_000));
        assert_eq!(analysis.excluding_cash.grand_total, dec!(400_000));
        assert_eq!(
            analysis.all_holdings_rollup.percentage_for(RollupBucket::CashOrShortTerm),
            dec!(20)
        );
        assert_eq!(
            analysis.excluding_cash_rollup.percentage_for(RollupBucket::Stock),
            dec!(100)
        );
    }

    #[test]
    fn test_pipeline_with_selector() {
        let config = AllocationConfig::new().with_cash_symbols(["SPAXX**"]);
        let analysis = analyze(&holdings(), Some("*1234"), &config);

        assert_eq!(analysis.account_selector.as_deref(), Some("*1234"));
        assert_eq!(analysis.all_holdings.holding_count(), 2);
        assert_eq!(analysis.excluding_cash.grand_total, dec!(300_000));
    }

    #[test]
    fn test_pipeline_unmatched_selector() {
        let config = AllocationConfig::new().with_account_match(AccountMatch::Exact);
        let analysis = analyze(&holdings(), Some("*1234"), &config);

        assert!(analysis.all_holdings.is_empty());
        assert_eq!(analysis.all_holdings.grand_total, Decimal::ZERO);
        assert_eq!(analysis.all_holdings_rollup.buckets.len(), 3);
    }
}
