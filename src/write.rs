use crate::error::Result;
use crate::{Record, Value};

/// Encode a record as a document tree.
pub fn encode<R: Record>(record: &R) -> Value {
    Value::Mapping(R::descriptor().encode(record))
}

/// Serialize a record to JSON bytes.
pub fn to_vec<R: Record>(record: &R) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&encode(record))?)
}

/// Serialize a record to a JSON string.
pub fn to_string<R: Record>(record: &R) -> Result<String> {
    Ok(serde_json::to_string(&encode(record))?)
}
