//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used by the outer layers of
//! the crate: configuration loading, filter parsing, and the command-line binary.
//!
//! The validator and the presenter never produce an `AppError`. Validation failures
//! are ordinary data (a list of messages), and rendering is total over well-typed input.
//!
//! `AppError` provides `From` trait implementations for `std::io::Error`,
//! `serde_json::Error` and `validator::ValidationErrors`,
//! allowing for easy conversion using the `?` operator.

use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur outside the pure core.
#[derive(Debug)]
pub enum AppError {
    /// Input that is structurally fine but carries an unusable value,
    /// such as an unparsable date bound in a filter.
    BadRequest(String),
    /// A required setting is missing or malformed.
    Config(String),
    /// Reading input or writing output failed.
    Io(String),
    /// Input could not be decoded as the expected JSON shape.
    Parse(String),
    /// Field-level validation failed.
    /// Wraps errors from the `validator` crate, or the messages of `validate_user`.
    ValidationError(String),
}

impl AppError {
    /// Process exit code the binary uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ValidationError(_) => 1,
            AppError::BadRequest(_) | AppError::Parse(_) => 2,
            AppError::Config(_) => 3,
            AppError::Io(_) => 4,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O Error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> AppError {
        AppError::Io(error.to_string())
    }
}

/// Converts `serde_json::Error` into `AppError`.
///
/// I/O failures surfaced through the JSON reader stay `Io`; everything else
/// (syntax, missing fields, wrong types) becomes `Parse`.
impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        if error.is_io() {
            AppError::Io(error.to_string())
        } else {
            AppError::Parse(error.to_string())
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}
