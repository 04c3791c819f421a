//! Persisted snapshot decoding.
//!
//! # Responsibility
//! - Turn a stored version snapshot into the raw content string the
//!   normalizer accepts.
//!
//! # Invariants
//! - Byte blobs are decoded as lossy UTF-8; bytes must be integers `0..=255`.
//! - Input that is not JSON is returned unchanged so the normalizer can
//!   classify it as invalid content.

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Element `index` of a byte array is not a byte.
    InvalidByte { index: usize },
    /// A buffer or envelope object has no `data` payload.
    MissingData,
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidByte { index } => write!(f, "snapshot byte {index} is not in 0..=255"),
            Self::MissingData => write!(f, "snapshot buffer has no data"),
        }
    }
}

impl Error for SnapshotError {}

/// Decodes the text of a snapshot file into raw block content.
pub fn decode_snapshot(raw: &str) -> Result<String, SnapshotError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode_snapshot_value(&value),
        Err(_) => Ok(raw.to_string()),
    }
}

/// Decodes an already-parsed snapshot value.
///
/// Accepted shapes:
/// - a JSON string holding the content,
/// - a numeric byte array,
/// - `{ "type": "Buffer", "data": [..] }`,
/// - an envelope `{ "snapshot_data": <any of the above> }`.
///
/// Anything else is assumed to be the content itself.
pub fn decode_snapshot_value(value: &Value) -> Result<String, SnapshotError> {
    match value {
        Value::String(content) => Ok(content.clone()),
        Value::Array(items) if items.first().is_some_and(Value::is_number) => decode_bytes(items),
        Value::Object(object) => decode_object(object, value),
        other => Ok(other.to_string()),
    }
}

fn decode_object(object: &Map<String, Value>, value: &Value) -> Result<String, SnapshotError> {
    if let Some(envelope) = object.get("snapshot_data") {
        return match envelope {
            Value::Null => Err(SnapshotError::MissingData),
            inner => decode_snapshot_value(inner),
        };
    }
    if object.get("type").and_then(Value::as_str) == Some("Buffer") {
        return match object.get("data") {
            Some(Value::Array(items)) => decode_bytes(items),
            _ => Err(SnapshotError::MissingData),
        };
    }
    Ok(value.to_string())
}

fn decode_bytes(items: &[Value]) -> Result<String, SnapshotError> {
    let bytes = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_u64()
                .and_then(|byte| u8::try_from(byte).ok())
                .ok_or(SnapshotError::InvalidByte { index })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
