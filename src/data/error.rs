use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors – abort the request, never the process
// ---------------------------------------------------------------------------

/// Everything that can go wrong while reading one of the dataset files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("data file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: row {row}, column '{column}': cannot parse '{value}'", .path.display())]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("{}: row {row}, policy {policy_id}: end date {end} precedes start date {start}", .path.display())]
    InvalidDateRange {
        path: PathBuf,
        row: usize,
        policy_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

// ---------------------------------------------------------------------------
// Averages over nothing
// ---------------------------------------------------------------------------

/// An average was requested over zero records.
///
/// Summaries store averages as `Option`, where `None` stands for this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("average over zero records is undefined")]
pub struct DivisionUndefined;

/// A money total left the range `Decimal` can represent.
///
/// Summaries store totals as `Option`, where `None` stands for this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount total overflows the decimal range")]
pub struct AmountOverflow;
