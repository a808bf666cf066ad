//! Account filtering.
//!
//! Restricts a holding set to one account before aggregation, and lists the
//! accounts present in an export. A selector that matches nothing yields an
//! empty set; downstream totals are then zero.

mod accounts;

pub use accounts::*;
