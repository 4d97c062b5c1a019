use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("field values must be scalar; got {0}")]
    NonScalar(String),

    #[error("invalid origin identifier: {0}")]
    InvalidOrigin(String),
}
