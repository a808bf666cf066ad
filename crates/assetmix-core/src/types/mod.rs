//! Domain types for allocation analysis.
//!
//! - [`Holding`]: One row of the export with per-class dollar amounts
//! - [`AssetClass`]: The eight raw asset classes
//! - [`AccountMatch`]: Policy for matching partial account selectors
//! - [`CashExclusionSet`]: Symbols removed from the cash-excluded view
//! - [`AllocationConfig`]: Explicit configuration for a run

mod account;
mod asset_class;
mod config;
mod holding;

pub use account::AccountMatch;
pub use asset_class::AssetClass;
pub use config::{AllocationConfig, CashExclusionSet};
pub(crate) use config::normalize_symbol;
pub use holding::{Holding, HoldingBuilder};
