//! Validation limits and result types.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label used by name checks when the caller supplies none.
pub const DEFAULT_NAME_LABEL: &str = "Name";

/// Label used by date checks when the caller supplies none.
pub const DEFAULT_DATE_LABEL: &str = "Date";

/// Minimum trimmed length of a first or last name, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum trimmed length of a first or last name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Minimum trimmed length of a position title.
pub const MIN_POSITION_LENGTH: usize = 2;

/// Maximum trimmed length of a position title.
pub const MAX_POSITION_LENGTH: usize = 100;

/// Highest accepted salary.
pub const MAX_SALARY: f64 = 10_000_000.0;

/// Earliest accepted date (1900-01-01).
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Aggregated result of validating one employee record.
///
/// `errors` keeps fields in the order they were checked, so the first entry
/// is the field a form should focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: IndexMap<String, String>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: IndexMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Error message recorded for `field`, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Name of the first failing field.
    pub fn first_error_field(&self) -> Option<&str> {
        self.errors.keys().next().map(String::as_str)
    }
}
