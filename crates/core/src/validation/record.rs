//! Record-level validation: run every field check and collect all failures.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use super::fields::{
    validate_date_on, validate_email, validate_name, validate_position, validate_salary,
};
use super::rules::ValidationResult;
use crate::employee::NewEmployee;

const HIRE_DATE_LABEL: &str = "Hire date";

/// Validate a submitted employee record against today's UTC date.
///
/// Name, email and position are always checked. Salary is checked only when
/// present, non-null and not `""`; hire date only when it is a non-empty
/// value. Non-string values in text fields count as missing.
///
/// A numeric hire date is read as milliseconds since the Unix epoch; `0`
/// counts as empty.
pub fn validate_employee(data: &Map<String, Value>) -> ValidationResult {
    validate_employee_on(data, Utc::now().date_naive())
}

/// [`validate_employee`] with an explicit `today` for the hire-date range.
pub fn validate_employee_on(data: &Map<String, Value>, today: NaiveDate) -> ValidationResult {
    let text = |field: &str| data.get(field).and_then(Value::as_str);
    let mut errors = IndexMap::new();

    let checks = [
        ("firstName", validate_name(text("firstName"), "First name")),
        ("lastName", validate_name(text("lastName"), "Last name")),
        ("email", validate_email(text("email"))),
        ("position", validate_position(text("position"))),
    ];
    for (field, error) in checks {
        if let Some(message) = error {
            errors.insert(field.to_string(), message);
        }
    }

    match data.get("salary") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s.is_empty() => {}
        Some(salary) => {
            if let Some(message) = validate_salary(Some(salary)) {
                errors.insert("salary".to_string(), message);
            }
        }
    }

    let hire_date_error = match data.get("hireDate") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => validate_date_on(Some(s.as_str()), HIRE_DATE_LABEL, today),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => match epoch_millis_date(n) {
            Some(date) => validate_date_on(Some(date.as_str()), HIRE_DATE_LABEL, today),
            None => Some(invalid_hire_date()),
        },
        Some(_) => Some(invalid_hire_date()),
    };
    if let Some(message) = hire_date_error {
        errors.insert("hireDate".to_string(), message);
    }

    ValidationResult::from_errors(errors)
}

fn invalid_hire_date() -> String {
    format!("Please enter a valid {}", HIRE_DATE_LABEL.to_lowercase())
}

/// Calendar date (`YYYY-MM-DD`) of an epoch-milliseconds timestamp.
fn epoch_millis_date(n: &Number) -> Option<String> {
    let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
    DateTime::from_timestamp_millis(millis)
        .map(|ts| ts.date_naive().format("%Y-%m-%d").to_string())
}

/// Validate a typed creation payload.
pub fn validate_new_employee(input: &NewEmployee) -> ValidationResult {
    let mut data = Map::new();
    data.insert("firstName".into(), Value::String(input.first_name.clone()));
    data.insert("lastName".into(), Value::String(input.last_name.clone()));
    data.insert("email".into(), Value::String(input.email.clone()));
    data.insert("position".into(), Value::String(input.position.clone()));
    if let Some(salary) = input.salary {
        // NaN and infinities have no JSON number form; keep them as text so
        // the numeric check reports them.
        let value = Number::from_f64(salary)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(salary.to_string()));
        data.insert("salary".into(), value);
    }
    if let Some(hire_date) = &input.hire_date {
        data.insert("hireDate".into(), Value::String(hire_date.clone()));
    }
    validate_employee(&data)
}
