//! Per-class totals and percentages.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rollup::{rollup, Rollup};
use crate::types::{normalize_symbol, AssetClass, CashExclusionSet, Holding};

/// Aggregate over a holding set for one category.
///
/// Used for both raw asset classes and rollup buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClassTotal {
    /// Display name of the class or bucket.
    pub class_name: String,

    /// Summed dollar amount.
    pub total_amount: Decimal,

    /// `total_amount / grand_total * 100`, or zero when the grand total is
    /// zero. Unrounded.
    pub percentage_of_portfolio: Decimal,

    /// Holdings with a non-zero amount in the class. For a rollup bucket,
    /// the sum over its constituent classes.
    #[serde(default)]
    pub holding_count: usize,
}

impl AssetClassTotal {
    /// Creates a total, deriving the percentage from `grand_total`.
    #[must_use]
    pub fn new(class_name: impl Into<String>, total_amount: Decimal, grand_total: Decimal) -> Self {
        Self {
            class_name: class_name.into(),
            total_amount,
            percentage_of_portfolio: percentage_of(total_amount, grand_total),
            holding_count: 0,
        }
    }

    /// Sets the number of holdings contributing to the total.
    #[must_use]
    pub fn with_holding_count(mut self, holding_count: usize) -> Self {
        self.holding_count = holding_count;
        self
    }
}

/// Returns `amount` as a percentage (0-100) of `grand_total`.
///
/// A zero grand total yields zero rather than a division error.
#[must_use]
pub fn percentage_of(amount: Decimal, grand_total: Decimal) -> Decimal {
    if grand_total.is_zero() {
        Decimal::ZERO
    } else {
        amount / grand_total * Decimal::ONE_HUNDRED
    }
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// The holdings that were aggregated, unchanged.
    pub per_row: Vec<Holding>,

    /// Totals for every asset class, in canonical order.
    pub class_totals: BTreeMap<AssetClass, AssetClassTotal>,

    /// Sum of all amounts across holdings and classes.
    pub grand_total: Decimal,

    /// Symbols removed before aggregating, in first-seen order.
    pub excluded_symbols: Vec<String>,
}

impl AggregationResult {
    /// Returns the total for `class`.
    #[must_use]
    pub fn total_for(&self, class: AssetClass) -> Decimal {
        self.class_totals
            .get(&class)
            .map_or(Decimal::ZERO, |t| t.total_amount)
    }

    /// Returns the unrounded percentage for `class`.
    #[must_use]
    pub fn percentage_for(&self, class: AssetClass) -> Decimal {
        self.class_totals
            .get(&class)
            .map_or(Decimal::ZERO, |t| t.percentage_of_portfolio)
    }

    /// Returns the number of aggregated holdings.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.per_row.len()
    }

    /// Returns true if no holdings were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_row.is_empty()
    }

    /// Rolls the class totals up into the three summary buckets.
    #[must_use]
    pub fn rollup(&self) -> Rollup {
        rollup(&self.class_totals, self.grand_total)
    }
}

/// Aggregates holdings into per-class totals and percentages.
///
/// Every asset class appears in the result, with zero totals where no
/// holding carries it. The grand total is the sum of the class totals, so the
/// two always agree exactly.
///
/// # Example
///
/// ```
/// use assetmix_core::aggregation::aggregate;
/// use assetmix_core::types::{AssetClass, Holding};
/// use rust_decimal_macros::dec;
///
/// let holdings = vec![
///     Holding::builder()
///         .symbol("FXAIX")
///         .allocation(AssetClass::DomesticStock, dec!(300_000))
///         .build()
///         .unwrap(),
///     Holding::builder()
///         .symbol("FSPSX")
///         .allocation(AssetClass::ForeignStock, dec!(100_000))
///         .allocation(AssetClass::Bonds, dec!(50_000))
///         .allocation(AssetClass::ShortTerm, dec!(50_000))
///         .build()
///         .unwrap(),
/// ];
///
/// let result = aggregate(&holdings);
/// assert_eq!(result.grand_total, dec!(500_000));
/// assert_eq!(result.percentage_for(AssetClass::DomesticStock), dec!(60));
/// ```
#[must_use]
pub fn aggregate(holdings: &[Holding]) -> AggregationResult {
    aggregate_rows(holdings.to_vec(), Vec::new())
}

/// Aggregates holdings after removing every holding whose symbol is in
/// `excluded_symbols`.
///
/// The grand total and all percentages are recomputed from the reduced set,
/// never scaled from a previous result.
#[must_use]
pub fn aggregate_excluding(
    holdings: &[Holding],
    excluded_symbols: &CashExclusionSet,
) -> AggregationResult {
    let mut kept = Vec::with_capacity(holdings.len());
    let mut removed: Vec<String> = Vec::new();

    for holding in holdings {
        if excluded_symbols.contains(&holding.symbol) {
            let key = normalize_symbol(&holding.symbol);
            if !removed.iter().any(|s| normalize_symbol(s) == key) {
                removed.push(holding.symbol.clone());
            }
        } else {
            kept.push(holding.clone());
        }
    }

    aggregate_rows(kept, removed)
}

fn aggregate_rows(per_row: Vec<Holding>, excluded_symbols: Vec<String>) -> AggregationResult {
    let mut sums: BTreeMap<AssetClass, (Decimal, usize)> = AssetClass::all()
        .iter()
        .map(|class| (*class, (Decimal::ZERO, 0)))
        .collect();

    for holding in &per_row {
        for (class, amount) in &holding.allocations {
            let entry = sums.entry(*class).or_insert((Decimal::ZERO, 0));
            entry.0 += *amount;
            if !amount.is_zero() {
                entry.1 += 1;
            }
        }
    }

    let grand_total: Decimal = sums.values().map(|(total, _)| *total).sum();

    let class_totals = sums
        .into_iter()
        .map(|(class, (total, count))| {
            (
                class,
                AssetClassTotal::new(class.label(), total, grand_total).with_holding_count(count),
            )
        })
        .collect();

    debug!(
        holdings = per_row.len(),
        excluded = excluded_symbols.len(),
        %grand_total,
        "aggregated allocations"
    );

    AggregationResult {
        per_row,
        class_totals,
        grand_total,
        excluded_symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(symbol: &str, amounts: &[(AssetClass, Decimal)]) -> Holding {
        Holding::builder()
            .symbol(symbol)
            .allocations(amounts.iter().copied())
            .build()
            .unwrap()
    }

    fn example() -> Vec<Holding> {
        vec![
            holding("FXAIX", &[(AssetClass::DomesticStock, dec!(300_000))]),
            holding(
                "FSPSX",
                &[
                    (AssetClass::ForeignStock, dec!(100_000)),
                    (AssetClass::Bonds, dec!(50_000)),
                    (AssetClass::ShortTerm, dec!(50_000)),
                ],
            ),
        ]
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec!(25), dec!(100)), dec!(25));
        assert_eq!(percentage_of(dec!(25), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_worked_example() {
        let result = aggregate(&example());

        assert_eq!(result.grand_total, dec!(500_000));
        assert_eq!(result.percentage_for(AssetClass::DomesticStock), dec!(60));
        assert_eq!(result.percentage_for(AssetClass::ForeignStock), dec!(20));
        assert_eq!(result.percentage_for(AssetClass::Bonds), dec!(10));
        assert_eq!(result.percentage_for(AssetClass::ShortTerm), dec!(10));
        assert_eq!(result.percentage_for(AssetClass::Preferred), Decimal::ZERO);
        assert_eq!(result.holding_count(), 2);
        assert!(result.excluded_symbols.is_empty());
    }

    #[test]
    fn test_every_class_present() {
        let result = aggregate(&example());
        assert_eq!(result.class_totals.len(), AssetClass::all().len());

        let names: Vec<&str> = result
            .class_totals
            .values()
            .map(|t| t.class_name.as_str())
            .collect();
        assert_eq!(names[0], "Domestic Stock");
        assert_eq!(names[3], "Short_term");
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[]);
        assert!(result.is_empty());
        assert_eq!(result.grand_total, Decimal::ZERO);
        assert!(result
            .class_totals
            .values()
            .all(|t| t.percentage_of_portfolio.is_zero()));
    }

    #[test]
    fn test_all_zero_amounts() {
        let holdings = vec![holding("ZERO", &[(AssetClass::Other, Decimal::ZERO)])];
        let result = aggregate(&holdings);
        assert_eq!(result.grand_total, Decimal::ZERO);
        assert_eq!(result.percentage_for(AssetClass::Other), Decimal::ZERO);
    }

    #[test]
    fn test_excluding_recomputes_from_scratch() {
        let holdings = example();
        let excluded = CashExclusionSet::from_symbols(["fspsx"]);
        let result = aggregate_excluding(&holdings, &excluded);

        assert_eq!(result.grand_total, dec!(300_000));
        assert_eq!(result.percentage_for(AssetClass::DomesticStock), dec!(100));
        assert_eq!(result.total_for(AssetClass::Bonds), Decimal::ZERO);
        assert_eq!(result.excluded_symbols, vec!["FSPSX".to_string()]);
    }

    #[test]
    fn test_excluding_records_each_symbol_once() {
        let mut holdings = example();
        holdings.push(holding("FSPSX", &[(AssetClass::ForeignStock, dec!(1))]));
        let excluded = CashExclusionSet::from_symbols(["FSPSX", "NOPE"]);
        let result = aggregate_excluding(&holdings, &excluded);
        assert_eq!(result.excluded_symbols, vec!["FSPSX".to_string()]);
        assert_eq!(result.holding_count(), 1);
    }

    #[test]
    fn test_excluding_dedupes_across_case() {
        let mut holdings = example();
        holdings.push(holding("SPAXX**", &[(AssetClass::ShortTerm, dec!(10))]));
        holdings.push(holding("spaxx**", &[(AssetClass::ShortTerm, dec!(5))]));

        let result = aggregate_excluding(&holdings, &CashExclusionSet::from_symbols(["SPAXX**"]));
        assert_eq!(result.excluded_symbols, vec!["SPAXX**".to_string()]);
        assert_eq!(result.holding_count(), 2);
    }

    #[test]
    fn test_class_holding_counts() {
        let mut holdings = example();
        holdings.push(holding("ZERO", &[(AssetClass::Bonds, Decimal::ZERO)]));
        let result = aggregate(&holdings);

        let count = |class: AssetClass| result.class_totals[&class].holding_count;
        assert_eq!(count(AssetClass::DomesticStock), 1);
        assert_eq!(count(AssetClass::Bonds), 1);
        assert_eq!(count(AssetClass::ShortTerm), 1);
        assert_eq!(count(AssetClass::Preferred), 0);
    }

    #[test]
    fn test_excluding_zero_amount_symbol_keeps_grand_total() {
        let mut holdings = example();
        holdings.push(holding("SPAXX**", &[(AssetClass::ShortTerm, Decimal::ZERO)]));

        let full = aggregate(&holdings);
        let excluded = aggregate_excluding(&holdings, &CashExclusionSet::from_symbols(["SPAXX**"]));
        assert_eq!(full.grand_total, excluded.grand_total);
    }

    #[test]
    fn test_thirds_stay_unrounded() {
        let holdings = vec![
            holding("A", &[(AssetClass::DomesticStock, dec!(1))]),
            holding("B", &[(AssetClass::ForeignStock, dec!(1))]),
            holding("C", &[(AssetClass::Bonds, dec!(1))]),
        ];
        let result = aggregate(&holdings);
        let pct = result.percentage_for(AssetClass::DomesticStock);
        assert!(pct.scale() > 2);
        assert_eq!(pct.round_dp(2), dec!(33.33));
    }
}
