//! Employee record types and payload DTOs.
//!
//! All types serialize with camelCase keys (`firstName`, `hireDate`, ...) so
//! the persisted blob and form payloads share one shape.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::format::{coerce_number, format_name};
use crate::types::{EmployeeId, Timestamp};

/// Required fields, in the order the store checks them.
pub const REQUIRED_FIELDS: [&str; 4] = ["firstName", "lastName", "email", "position"];

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new employee.
///
/// Missing or `null` required strings deserialize as empty and are rejected
/// by the store's required-field check rather than by serde. Salary accepts
/// form text (`"75000"`); `""` and `null` mean no salary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEmployee {
    #[serde(deserialize_with = "null_as_blank")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub email: String,
    #[serde(deserialize_with = "null_as_blank")]
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "form_number"
    )]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

/// DTO for updating an existing employee. All fields are optional; `None`
/// leaves the stored value untouched.
///
/// A required field sent as `null` becomes `Some("")`, so the merged record
/// fails the required-field check instead of silently keeping the old value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_null_as_blank"
    )]
    pub first_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_null_as_blank"
    )]
    pub last_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_null_as_blank"
    )]
    pub email: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_null_as_blank"
    )]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "form_number"
    )]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

/// A seed dataset row: a caller-chosen id plus the creation fields. The store
/// stamps timestamps when it loads the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEmployee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub fields: NewEmployee,
}

// ---------------------------------------------------------------------------
// Payload deserializers
// ---------------------------------------------------------------------------

fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn present_null_as_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    null_as_blank(deserializer).map(Some)
}

/// Salary as a number or numeric text; `null` and `""` are absent.
fn form_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        value @ (Value::Number(_) | Value::String(_)) => coerce_number(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("salary is not a number: {value}"))),
        other => Err(de::Error::custom(format!(
            "salary is not a number: {other}"
        ))),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl NewEmployee {
    /// First required field (in [`REQUIRED_FIELDS`] order) that is blank.
    pub fn first_blank_required(&self) -> Option<&'static str> {
        first_blank([
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.position,
        ])
    }
}

impl EmployeePatch {
    /// Whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == EmployeePatch::default()
    }
}

impl SeedEmployee {
    pub fn into_employee(self, now: Timestamp) -> Employee {
        Employee::from_new(self.id, self.fields, now)
    }
}

impl Employee {
    /// Build a fresh record; both timestamps are set to `now`.
    pub fn from_new(id: EmployeeId, input: NewEmployee, now: Timestamp) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            position: input.position,
            department: input.department,
            salary: input.salary,
            hire_date: input.hire_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge `patch` over this record and refresh `updated_at`.
    pub fn apply(&mut self, patch: EmployeePatch, now: Timestamp) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.position {
            self.position = v;
        }
        if patch.department.is_some() {
            self.department = patch.department;
        }
        if patch.salary.is_some() {
            self.salary = patch.salary;
        }
        if patch.hire_date.is_some() {
            self.hire_date = patch.hire_date;
        }
        self.updated_at = now;
    }

    pub fn first_blank_required(&self) -> Option<&'static str> {
        first_blank([
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.position,
        ])
    }

    /// "First Last" with surrounding whitespace trimmed.
    pub fn full_name(&self) -> String {
        format_name(Some(&self.first_name), Some(&self.last_name))
    }

    /// The creation fields of this record, without id and timestamps.
    pub fn to_new_employee(&self) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            salary: self.salary,
            hire_date: self.hire_date.clone(),
        }
    }
}

fn first_blank(values: [&String; 4]) -> Option<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .zip(values)
        .find(|(_, value)| is_blank(value))
        .map(|(field, _)| *field)
}
