//! Three-bucket rollup of asset classes.
//!
//! Every raw [`AssetClass`](crate::types::AssetClass) belongs to exactly one
//! [`RollupBucket`]:
//!
//! | Bucket | Classes |
//! |--------|---------|
//! | Stock | domestic_stock, foreign_stock |
//! | Cash or Short-Term | bonds, short_term |
//! | Other | unknown, other, convertibles, preferred |

mod bucket;

pub use bucket::*;
