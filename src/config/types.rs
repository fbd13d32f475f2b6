use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{ReportFormat, parse_duration_arg};
use crate::error::{AppError, AppResult, ValidationError};

/// Optional run configuration, merged under explicit CLI flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub dir: Option<String>,
    pub file: Option<String>,
    pub output: Option<String>,
    pub format: Option<ReportFormat>,
    pub parallel: Option<NonZeroUsize>,
    pub timeout: Option<DurationValue>,
    pub verbose: Option<bool>,
}

/// Duration written either as integer seconds or as a suffixed string
/// (`"500ms"`, `"2m"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    /// Converts the config value into a concrete duration.
    ///
    /// # Errors
    ///
    /// Returns an error for zero, overflowing, or unparseable values.
    pub fn as_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(0) => {
                Err(AppError::validation(ValidationError::DurationZero))
            }
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
