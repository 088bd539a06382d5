//! Employee validation engine.
//!
//! Per-field checks return `Option<String>` (`None` when the value passes);
//! the record-level check aggregates them into a [`ValidationResult`] and
//! never fails.

pub mod fields;
pub mod record;
pub mod rules;

pub use fields::{
    validate_date, validate_date_on, validate_email, validate_name, validate_position,
    validate_salary,
};
pub use record::{validate_employee, validate_employee_on, validate_new_employee};
pub use rules::ValidationResult;
