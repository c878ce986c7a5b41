use thiserror::Error;

/// Errors that can occur when cross-cutting a stem.
#[derive(Error, Debug)]
pub enum BuckingError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
