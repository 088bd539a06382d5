//! Employee records core: record types, the validation engine, and display
//! helpers. Pure logic with no I/O.

pub mod catalog;
pub mod employee;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;
