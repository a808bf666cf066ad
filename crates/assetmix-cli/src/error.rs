//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error in {path}: {reason}")]
    Config {
        /// Config file path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Holdings file in a format the loader cannot read.
    #[error("Unsupported holdings file format: {path}. Export the allocation view as CSV.")]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// Holdings file has no header row with a Symbol column.
    #[error("No header row with a 'Symbol' column found in {path}")]
    MissingHeader {
        /// Holdings file path.
        path: PathBuf,
    },

    /// A required column is absent from the header row.
    #[error("Missing required column '{column}' in holdings file")]
    MissingColumn {
        /// Column name.
        column: String,
    },

    /// An amount cell could not be parsed or is negative.
    #[error("Invalid amount '{value}' in row {row}, column '{column}'")]
    InvalidAmount {
        /// 1-based row number in the source file.
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell text.
        value: String,
    },

    /// A holding row was rejected by the core.
    #[error("Invalid holding in row {row}: {source}")]
    InvalidHolding {
        /// 1-based row number in the source file.
        row: usize,
        /// Core validation error.
        #[source]
        source: assetmix_core::AllocationError,
    },

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_display() {
        let err = CliError::InvalidAmount {
            row: 4,
            column: "Bonds".into(),
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid amount 'abc' in row 4, column 'Bonds'"
        );
    }

    #[test]
    fn test_unsupported_format_hint() {
        let err = CliError::UnsupportedFormat {
            path: PathBuf::from("AssetAllocation.xls"),
        };
        assert!(err.to_string().contains("CSV"));
    }
}
