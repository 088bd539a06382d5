//! In-memory employee record store with optional write-through persistence.
//!
//! [`EmployeeStore`] owns the collection; [`storage`] provides the key-value
//! backends it can write through to, and [`snapshot`] the blob format.

pub mod seed;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod store;

pub use stats::DashboardStats;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{parse_id, EmployeeStore, DEFAULT_SLOT};
