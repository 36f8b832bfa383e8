//! Error types for event normalization and export.

use thiserror::Error;

/// A required form field is missing or a field could not be read.
///
/// Validation runs before any artifact is built, so a `ValidationError`
/// always means nothing was produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event title is required")]
    MissingTitle,

    #[error("Event date is required")]
    MissingDate,

    #[error("Start time is required for timed events")]
    MissingTime,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Local time {0} does not exist in this timezone")]
    NonexistentLocalTime(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, EventError>;
