/// Employee identifiers are assigned sequentially by the store, starting at 1.
pub type EmployeeId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
