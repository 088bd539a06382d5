//! Dashboard figures derived from the employee collection.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use staffbook_core::employee::Employee;
use staffbook_core::format::parse_calendar_date;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: usize,
    /// Distinct non-blank departments, compared case-insensitively.
    pub departments: usize,
    /// Employees whose hire date falls in the same calendar month as `today`.
    pub new_hires_this_month: usize,
}

/// Compute dashboard figures as of `today`.
pub fn dashboard_stats(employees: &[Employee], today: NaiveDate) -> DashboardStats {
    let departments: BTreeSet<String> = employees
        .iter()
        .filter_map(|e| e.department.as_deref())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_lowercase)
        .collect();

    let new_hires_this_month = employees
        .iter()
        .filter_map(|e| e.hire_date.as_deref().and_then(parse_calendar_date))
        .filter(|d| d.year() == today.year() && d.month() == today.month())
        .count();

    DashboardStats {
        total_employees: employees.len(),
        departments: departments.len(),
        new_hires_this_month,
    }
}
