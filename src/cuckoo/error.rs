use thiserror::Error;

use bincode::error::{DecodeError, EncodeError};

use super::config::CuckooFilterConfigBuilderError;

pub type Result<T> = std::result::Result<T, CuckooError>;

/// Failures while reading the fixed-length encoding produced by
/// `CuckooFilter::to_bytes`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Truncated input: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u8),

    #[error("Empty slot {slot} of bucket {bucket} carries fingerprint data")]
    DirtyEmptySlot { bucket: usize, slot: usize },
}

#[derive(Error, Debug, PartialEq)]
pub enum CuckooError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Filter is full: no free slot after {relocations} relocations")]
    FilterFull { relocations: usize },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

impl From<CuckooFilterConfigBuilderError> for CuckooError {
    fn from(err: CuckooFilterConfigBuilderError) -> Self {
        CuckooError::InvalidConfig(err.to_string())
    }
}

impl From<EncodeError> for CuckooError {
    fn from(err: EncodeError) -> Self {
        CuckooError::SerializationError(err.to_string())
    }
}

impl From<DecodeError> for CuckooError {
    fn from(err: DecodeError) -> Self {
        CuckooError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for CuckooError {
    fn from(err: serde_json::Error) -> Self {
        CuckooError::SerializationError(err.to_string())
    }
}
