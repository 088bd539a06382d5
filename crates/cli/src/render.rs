//! Text and JSON rendering of command outcomes.

use serde_json::json;
use staffbook_core::employee::Employee;
use staffbook_core::format::{format_date, format_salary};
use staffbook_core::validation::ValidationResult;

use crate::commands::Outcome;

/// Render an outcome for stdout.
pub fn render(outcome: &Outcome, as_json: bool) -> anyhow::Result<String> {
    if as_json {
        render_json(outcome)
    } else {
        Ok(render_text(outcome))
    }
}

fn render_json(outcome: &Outcome) -> anyhow::Result<String> {
    let value = match outcome {
        Outcome::Records(list) => serde_json::to_value(list)?,
        Outcome::Record(employee) => serde_json::to_value(employee)?,
        Outcome::Count(count) => json!({ "count": count }),
        Outcome::Stats(stats) => serde_json::to_value(stats)?,
        Outcome::Invalid(result) | Outcome::Checked(result) => serde_json::to_value(result)?,
        // Already a JSON document.
        Outcome::Snapshot(blob) => return Ok(blob.clone()),
        Outcome::Cleared => json!({ "cleared": true }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Records(list) if list.is_empty() => "No employees found".to_string(),
        Outcome::Records(list) => table(list),
        Outcome::Record(employee) => detail(employee),
        Outcome::Count(count) => count.to_string(),
        Outcome::Stats(stats) => format!(
            "Total employees:     {}\nDepartments:         {}\nNew hires this month: {}",
            stats.total_employees, stats.departments, stats.new_hires_this_month
        ),
        Outcome::Invalid(result) => field_errors("Employee not saved", result),
        Outcome::Checked(result) if result.is_valid => "Record is valid".to_string(),
        Outcome::Checked(result) => field_errors("Record is invalid", result),
        Outcome::Snapshot(blob) => blob.clone(),
        Outcome::Cleared => "All employees removed".to_string(),
    }
}

const HEADERS: [&str; 6] = ["ID", "Name", "Email", "Position", "Department", "Salary"];

fn table(list: &[Employee]) -> String {
    let rows: Vec<[String; 6]> = list
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.full_name(),
                e.email.clone(),
                e.position.clone(),
                e.department.clone().unwrap_or_default(),
                format_salary(e.salary),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&HEADERS.map(String::from)[..])];
    out.extend(rows.iter().map(|row| line(&row[..])));
    out.join("\n")
}

fn detail(e: &Employee) -> String {
    let fields = [
        ("ID", e.id.to_string()),
        ("Name", e.full_name()),
        ("Email", e.email.clone()),
        ("Position", e.position.clone()),
        ("Department", e.department.clone().unwrap_or_default()),
        ("Salary", format_salary(e.salary)),
        ("Hire date", format_date(e.hire_date.as_deref())),
        ("Created", e.created_at.to_rfc3339()),
        ("Updated", e.updated_at.to_rfc3339()),
    ];
    fields
        .iter()
        .map(|(label, value)| format!("{:<11}{value}", format!("{label}:")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_errors(heading: &str, result: &ValidationResult) -> String {
    let mut out = vec![format!("{heading}:")];
    out.extend(
        result
            .errors
            .iter()
            .map(|(field, message)| format!("  {field}: {message}")),
    );
    out.join("\n")
}
