//! Error types for morsel-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for morsel-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading sales data.
#[derive(Debug, Error)]
pub enum Error {
    /// The sales file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A date field could not be parsed.
    #[error("row {row}: invalid date {value:?}")]
    InvalidDate { row: usize, value: String },

    /// A sales field is not a finite, non-negative number.
    #[error("row {row}: invalid sales amount {value:?}")]
    InvalidSales { row: usize, value: String },

    /// A region field names no known region.
    #[error("row {row}: unknown region {value:?}")]
    UnknownRegion { row: usize, value: String },
}

impl Error {
    /// Format the error with a recovery hint for the terminal.
    pub fn with_hint(&self) -> String {
        let hint = match self {
            Error::Io { .. } => Some("run the dashboard from the directory containing output.csv"),
            Error::MissingColumn(_) => Some("the header row must contain date, region and sales"),
            Error::InvalidDate { .. } => Some("dates must look like 2021-01-15"),
            Error::UnknownRegion { .. } => Some("regions must be one of north, east, south, west"),
            Error::Csv(_) | Error::InvalidSales { .. } => None,
        };

        match hint {
            Some(hint) => format!("{self}\n  hint: {hint}"),
            None => self.to_string(),
        }
    }
}
