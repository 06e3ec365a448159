//! Error types for the shared domain models

use thiserror::Error;

/// Errors raised while parsing closed domain values from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown grade: {0}")]
    UnknownGrade(String),
}
