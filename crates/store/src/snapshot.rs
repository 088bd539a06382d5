//! JSON snapshot codec for the full employee collection.
//!
//! The snapshot is a single JSON array in collection order, with no envelope
//! and no schema version.

use staffbook_core::employee::Employee;
use staffbook_core::error::CoreError;

/// Serialize the collection into one JSON array blob.
pub fn encode(employees: &[Employee]) -> Result<String, CoreError> {
    serde_json::to_string(employees)
        .map_err(|e| CoreError::Internal(format!("Failed to encode employee snapshot: {e}")))
}

/// Parse a blob produced by [`encode`].
pub fn decode(blob: &str) -> Result<Vec<Employee>, CoreError> {
    serde_json::from_str(blob)
        .map_err(|e| CoreError::Internal(format!("Failed to decode employee snapshot: {e}")))
}
