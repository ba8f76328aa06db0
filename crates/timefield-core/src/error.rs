//! Error types for timefield-core operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimefieldError {
    #[error("Invalid date-time format: {0}")]
    InvalidDateTimeFormat(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid task index: {0}")]
    InvalidTaskIndex(usize),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, TimefieldError>;
