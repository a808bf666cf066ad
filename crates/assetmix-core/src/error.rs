//! Error types for allocation analysis.
//!
//! The aggregation functions themselves never fail: a zero grand total and an
//! empty account match are ordinary results. Errors only arise when building
//! domain values from untrusted input.

use thiserror::Error;

/// Result type for allocation operations.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Errors that can occur while constructing allocation inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AllocationError {
    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid holding data.
    #[error("Invalid holding '{symbol}': {reason}")]
    InvalidHolding {
        /// The holding symbol.
        symbol: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Asset class name that is not one of the recognized classes.
    #[error("Unknown asset class: {name}")]
    UnknownAssetClass {
        /// The unrecognized name.
        name: String,
    },

    /// Account match policy name that is not recognized.
    #[error("Unknown account match policy: {name} (expected exact, suffix or contains)")]
    UnknownMatchPolicy {
        /// The unrecognized name.
        name: String,
    },
}

impl AllocationError {
    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown asset class error.
    #[must_use]
    pub fn unknown_asset_class(name: impl Into<String>) -> Self {
        Self::UnknownAssetClass { name: name.into() }
    }
}
