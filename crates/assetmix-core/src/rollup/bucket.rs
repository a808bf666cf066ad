//! Rollup bucket definitions and the rollup computation.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::AssetClassTotal;
use crate::types::AssetClass;

/// Summary category grouping several raw asset classes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RollupBucket {
    /// Domestic and foreign stock
    Stock,
    /// Bonds and short-term instruments
    CashOrShortTerm,
    /// Everything else
    Other,
}

impl RollupBucket {
    /// Returns all buckets in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Stock, Self::CashOrShortTerm, Self::Other]
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stock => "Stock",
            Self::CashOrShortTerm => "Cash or Short-Term",
            Self::Other => "Other",
        }
    }

    /// Returns the asset classes that make up this bucket.
    #[must_use]
    pub fn constituents(&self) -> Vec<AssetClass> {
        AssetClass::all()
            .iter()
            .copied()
            .filter(|class| class.bucket() == *self)
            .collect()
    }
}

impl fmt::Display for RollupBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Bucket totals for one aggregation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollup {
    /// Totals for each of the three buckets. Always holds all three keys.
    pub buckets: BTreeMap<RollupBucket, AssetClassTotal>,

    /// Grand total shared with the class-level view.
    pub grand_total: Decimal,
}

impl Rollup {
    /// Returns the totals for `bucket`.
    #[must_use]
    pub fn get(&self, bucket: RollupBucket) -> Option<&AssetClassTotal> {
        self.buckets.get(&bucket)
    }

    /// Returns the dollar total for `bucket`.
    #[must_use]
    pub fn total_for(&self, bucket: RollupBucket) -> Decimal {
        self.get(bucket).map_or(Decimal::ZERO, |t| t.total_amount)
    }

    /// Returns the unrounded percentage for `bucket`.
    #[must_use]
    pub fn percentage_for(&self, bucket: RollupBucket) -> Decimal {
        self.get(bucket)
            .map_or(Decimal::ZERO, |t| t.percentage_of_portfolio)
    }

    /// Iterates over the buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (RollupBucket, &AssetClassTotal)> {
        self.buckets.iter().map(|(bucket, total)| (*bucket, total))
    }
}

/// Rolls class totals up into the three summary buckets.
///
/// Bucket percentages are computed from the bucket totals against
/// `grand_total`, the same figure the class percentages were computed
/// against, so both views close to the same 100%.
///
/// # Example
///
/// ```rust,ignore
/// let result = aggregate(&holdings);
/// let summary = rollup(&result.class_totals, result.grand_total);
/// println!("Stock: {}%", summary.percentage_for(RollupBucket::Stock).round_dp(2));
/// ```
#[must_use]
pub fn rollup(
    class_totals: &BTreeMap<AssetClass, AssetClassTotal>,
    grand_total: Decimal,
) -> Rollup {
    let mut sums: BTreeMap<RollupBucket, (Decimal, usize)> = RollupBucket::all()
        .iter()
        .map(|bucket| (*bucket, (Decimal::ZERO, 0)))
        .collect();

    for (class, total) in class_totals {
        let entry = sums.entry(class.bucket()).or_insert((Decimal::ZERO, 0));
        entry.0 += total.total_amount;
        entry.1 += total.holding_count;
    }

    let buckets = sums
        .into_iter()
        .map(|(bucket, (total, count))| {
            (
                bucket,
                AssetClassTotal::new(bucket.label(), total, grand_total)
                    .with_holding_count(count),
            )
        })
        .collect();

    Rollup {
        buckets,
        grand_total,
    }
}
