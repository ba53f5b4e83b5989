use bytes::Bytes;

use crate::{Record, Value};
use crate::error::{DecodeResult, Result};

/// Decode a record from a document tree.
pub fn decode<R: Record>(document: &Value) -> DecodeResult<R> {
    R::descriptor().decode(document)
}

/// Decode a record from JSON bytes.
///
/// Malformed JSON is reported as [`crate::Error::Json`]; a document whose root
/// is not an object as [`crate::Error::Decode`].
pub fn from_slice<R: Record>(data: &[u8]) -> Result<R> {
    let document: Value = serde_json::from_slice(data)?;
    Ok(decode(&document)?)
}

/// Decode a record from a JSON string.
pub fn from_str<R: Record>(data: &str) -> Result<R> {
    let document: Value = serde_json::from_str(data)?;
    Ok(decode(&document)?)
}

/// Decode a record from a JSON buffer.
pub fn from_bytes<R: Record>(data: Bytes) -> Result<R> {
    from_slice(&data)
}
