use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Collection file not found: {path}")]
    FileNotFound { path: PathBuf },
    #[error("Collection directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
    #[error("No collection files (*.json) found under {path}")]
    NoCollectionsFound { path: PathBuf },
    #[error("Failed to scan directory '{path}': {source}")]
    ScanDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{failed} request(s) failed.")]
    TestsFailed { failed: usize },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
}
