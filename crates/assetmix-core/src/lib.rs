//! # assetmix Core
//!
//! Allocation aggregation engine for brokerage "asset allocation" exports.
//!
//! A brokerage export lists, per holding, how many dollars fall into each of
//! eight asset classes. This crate turns those rows into:
//!
//! - per-class totals and percentages of the grand total,
//! - the same view with configured cash symbols removed,
//! - a three-bucket rollup (Stock / Cash or Short-Term / Other) of each.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: No I/O, no global state; configuration is passed in
//! - **Decimal money**: Amounts are summed with [`rust_decimal::Decimal`]
//! - **Recompute, never rescale**: Every view derives its percentages from
//!   its own grand total
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use assetmix_core::prelude::*;
//!
//! let config = AllocationConfig::new().with_cash_symbols(["SPAXX**"]);
//! let analysis = analyze(&holdings, Some("*1234"), &config);
//!
//! for (bucket, total) in analysis.excluding_cash_rollup.iter() {
//!     println!("{bucket}: {}%", total.percentage_of_portfolio.round_dp(2));
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Holdings, asset classes, account policy, configuration
//! - [`filter`] - Account selection and listing
//! - [`aggregation`] - Class totals, cash exclusion, full pipeline
//! - [`rollup`] - Three-bucket summary

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregation;
pub mod error;
pub mod filter;
pub mod rollup;
pub mod types;

// Re-export error types at crate root
pub use error::{AllocationError, AllocationResult};

pub use types::{
    AccountMatch, AllocationConfig, AssetClass, CashExclusionSet, Holding, HoldingBuilder,
};

pub use aggregation::{
    aggregate, aggregate_excluding, analyze, percentage_of, AggregationResult,
    AllocationAnalysis, AssetClassTotal,
};
pub use filter::{filter, filter_by_account, list_accounts, AccountSummary};
pub use rollup::{rollup, Rollup, RollupBucket};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use assetmix_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{AllocationError, AllocationResult};

    pub use crate::types::{
        AccountMatch, AllocationConfig, AssetClass, CashExclusionSet, Holding, HoldingBuilder,
    };

    pub use crate::aggregation::{
        aggregate, aggregate_excluding, analyze, AggregationResult, AllocationAnalysis,
        AssetClassTotal,
    };
    pub use crate::filter::{filter, filter_by_account, list_accounts, AccountSummary};
    pub use crate::rollup::{rollup, Rollup, RollupBucket};

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
