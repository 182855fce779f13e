//! Common types for the redaction module

use thiserror::Error;

/// Redaction error types
#[derive(Debug, Error)]
pub enum RedactError {
    #[error("Empty image: zero-pixel buffer")]
    EmptyImage,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RedactError>;
