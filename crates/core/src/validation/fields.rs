//! Single-field checks.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde_json::Value;

use super::rules::{
    min_date, MAX_NAME_LENGTH, MAX_POSITION_LENGTH, MAX_SALARY, MIN_NAME_LENGTH,
    MIN_POSITION_LENGTH,
};
use crate::format::{coerce_number, parse_calendar_date};

/// `local@domain.tld` with no whitespace and a single `@`.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Letters, whitespace, hyphens and apostrophes.
pub const NAME_PATTERN: &str = r"^[a-zA-Z\s'-]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NAME_PATTERN).expect("valid regex"));

/// Validate a first or last name; `label` prefixes every message.
///
/// # Examples
///
/// ```
/// use staffbook_core::validation::validate_name;
///
/// assert_eq!(validate_name(Some("O'Connor"), "Name"), None);
/// assert_eq!(
///     validate_name(Some("A"), "Last name").as_deref(),
///     Some("Last name must be at least 2 characters long")
/// );
/// ```
pub fn validate_name(value: Option<&str>, label: &str) -> Option<String> {
    let name = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Some(format!("{label} is required")),
    };

    let len = name.trim().chars().count();
    if len < MIN_NAME_LENGTH {
        return Some(format!(
            "{label} must be at least {MIN_NAME_LENGTH} characters long"
        ));
    }
    if len > MAX_NAME_LENGTH {
        return Some(format!(
            "{label} must be less than {MAX_NAME_LENGTH} characters"
        ));
    }
    if !NAME_RE.is_match(name) {
        return Some(format!(
            "{label} can only contain letters, spaces, hyphens, and apostrophes"
        ));
    }
    None
}

/// Validate an email address.
pub fn validate_email(value: Option<&str>) -> Option<String> {
    let email = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Some("Email is required".to_string()),
    };
    if !EMAIL_RE.is_match(email) {
        return Some("Please enter a valid email address".to_string());
    }
    None
}

/// Validate a position title.
pub fn validate_position(value: Option<&str>) -> Option<String> {
    let position = match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return Some("Position is required".to_string()),
    };

    let len = position.chars().count();
    if len < MIN_POSITION_LENGTH {
        return Some(format!(
            "Position must be at least {MIN_POSITION_LENGTH} characters long"
        ));
    }
    if len > MAX_POSITION_LENGTH {
        return Some(format!(
            "Position must be less than {MAX_POSITION_LENGTH} characters"
        ));
    }
    None
}

/// Validate a salary given as a number or numeric text.
///
/// Absent, `null` and `""` are reported as missing.
pub fn validate_salary(value: Option<&Value>) -> Option<String> {
    let value = match value {
        None | Some(Value::Null) => return Some("Salary is required".to_string()),
        Some(Value::String(s)) if s.is_empty() => {
            return Some("Salary is required".to_string())
        }
        Some(v) => v,
    };

    let Some(salary) = coerce_number(value) else {
        return Some("Salary must be a valid number".to_string());
    };
    if salary < 0.0 {
        return Some("Salary cannot be negative".to_string());
    }
    if salary > MAX_SALARY {
        return Some("Salary cannot exceed $10,000,000".to_string());
    }
    None
}

/// Validate a date against today's UTC date.
pub fn validate_date(value: Option<&str>, label: &str) -> Option<String> {
    validate_date_on(value, label, Utc::now().date_naive())
}

/// Validate a date against an explicit `today`.
///
/// The accepted range is 1900-01-01 through `today`, both inclusive.
pub fn validate_date_on(value: Option<&str>, label: &str, today: NaiveDate) -> Option<String> {
    let raw = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Some(format!("{label} is required")),
    };

    let Some(date) = parse_calendar_date(raw) else {
        return Some(format!("Please enter a valid {}", label.to_lowercase()));
    };
    if date > today {
        return Some(format!("{label} cannot be in the future"));
    }
    if date < min_date() {
        return Some(format!("{label} cannot be before 1900"));
    }
    None
}
