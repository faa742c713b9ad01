//! Error types for the awardfit_core library.

use chrono::NaiveDate;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for awardfit_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The persisted store could not be read or parsed
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// An add supplied an id already present in that date's log
    #[error("Duplicate {kind} id '{id}' in log for {date}")]
    DuplicateId {
        kind: &'static str,
        id: String,
        date: NaiveDate,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}
