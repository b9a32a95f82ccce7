//! Error types for the argot engine.

use thiserror::Error;

/// Errors raised while assembling a command registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgotError {
    /// The same option flag was bound twice
    #[error("Option '{0}' is registered more than once")]
    DuplicateOption(String),

    /// `-h` or `--help` was bound as a regular option
    #[error("Option '{0}' is reserved for help")]
    ReservedFlag(String),

    /// Flags must be non-empty and start with '-'
    #[error("Invalid option flag: '{0}'")]
    InvalidFlag(String),
}

/// Result type alias for registry construction
pub type Result<T> = std::result::Result<T, ArgotError>;

/// Failure produced by a single field's parse function.
///
/// The message is reported to the user verbatim, so it should name the
/// offending token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

/// Outcome of parsing one field's token(s)
pub type FieldResult<T> = std::result::Result<T, FieldError>;
