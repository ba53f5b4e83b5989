use thiserror::Error;

use crate::value::Kind;

/// Reasons a document value could not be converted to a field's kind.
///
/// These never reach the caller of a record decode: the field resolver
/// absorbs them and falls back to the field's default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("string {0:?} is not a numeric literal")]
    NotNumeric(String),

    #[error("string {0:?} is not a boolean literal")]
    NotBoolean(String),

    #[error("kind mismatch: expected {expected}, got {found}")]
    KindMismatch { expected: Kind, found: Kind },

    #[error("null cannot be coerced to a concrete value")]
    Null,

    #[error("number {0} is out of range for the target type")]
    OutOfRange(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown variant {0:?}")]
    UnknownVariant(String),
}

impl CoercionError {
    pub(crate) fn mismatch(expected: Kind, found: Kind) -> Self {
        CoercionError::KindMismatch { expected, found }
    }
}

/// Result type for coercion operations.
pub type CoerceResult<T> = std::result::Result<T, CoercionError>;

/// Errors surfaced by a record decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The top-level document was not a mapping, so there are no fields to
    /// resolve.
    #[error("invalid root for record {record}: expected mapping, got {found}")]
    InvalidRoot { record: &'static str, found: Kind },
}

/// Result type for decoding operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Error type for the byte-level entry points.
#[derive(Error, Debug)]
pub enum Error {
    /// The external parser or serializer failed; its error is passed through.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type for the byte-level entry points.
pub type Result<T> = std::result::Result<T, Error>;
