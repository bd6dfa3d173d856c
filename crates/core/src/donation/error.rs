use thiserror::Error;

/// Errors produced while coercing submitted form text into typed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidInteger { field: &'static str, value: String },
    #[error("{field} must be a date (YYYY-MM-DD), got '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("{field} must be a date and time (YYYY-MM-DD HH:MM), got '{value}'")]
    InvalidDateTime { field: &'static str, value: String },
}
