//! Allocation aggregation.
//!
//! Turns a flat list of holdings into per-class totals and percentages:
//!
//! - [`aggregate`]: totals over every holding
//! - [`aggregate_excluding`]: the same computation after removing the
//!   configured cash symbols, recomputed from scratch
//! - [`analyze`]: the full pipeline (filter, both aggregations, rollups)
//!
//! Amounts are summed as [`rust_decimal::Decimal`]. Percentages are kept at
//! full precision; rounding belongs to presentation.

mod analysis;
mod totals;

pub use analysis::*;
pub use totals::*;
