//! Error types for the sinulog schedule library.

use thiserror::Error;

/// Errors that can occur while loading, normalizing or exporting the schedule.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid date '{0}'. Expected \"Month Day Year\" or \"Month Day Year - Month Day Year\"")]
    InvalidDate(String),

    #[error("Could not parse event detail: {0}")]
    Detail(String),

    #[error("Invalid time of day '{0}'. Expected something like \"7:00 PM\"")]
    TimeOfDay(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
