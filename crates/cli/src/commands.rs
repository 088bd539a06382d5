//! Subcommand execution against an [`EmployeeStore`].

use std::fs;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};
use staffbook_core::employee::{Employee, EmployeePatch, NewEmployee};
use staffbook_core::format::{coerce_number, sanitize_form};
use staffbook_core::validation::{validate_employee_on, ValidationResult};
use staffbook_store::seed::{default_seed, parse_seed};
use staffbook_store::{parse_id, DashboardStats, EmployeeStore, FileStorage};

use crate::cli::{Command, EmployeeFields};
use crate::config::CliConfig;

/// What a command produced, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Records(Vec<Employee>),
    Record(Employee),
    Count(usize),
    Stats(DashboardStats),
    /// Form input failed validation; nothing was stored.
    Invalid(ValidationResult),
    /// Standalone validation result (`validate` command).
    Checked(ValidationResult),
    Snapshot(String),
    Cleared,
}

/// Open the file-backed store described by `config`.
pub fn open_store(config: &CliConfig) -> anyhow::Result<EmployeeStore> {
    let seed = match &config.seed_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            parse_seed(&json)?
        }
        None => default_seed(),
    };
    let store = EmployeeStore::open(FileStorage::new(&config.data_dir), &config.slot, seed)
        .with_context(|| format!("Failed to open store in {}", config.data_dir.display()))?;
    tracing::debug!(count = store.count(), slot = %config.slot, "Store opened");
    Ok(store)
}

/// Run one subcommand.
pub fn execute(store: &mut EmployeeStore, command: Command) -> anyhow::Result<Outcome> {
    execute_on(store, command, Utc::now().date_naive())
}

/// [`execute`] with an explicit `today` for date validation and statistics.
pub fn execute_on(
    store: &mut EmployeeStore,
    command: Command,
    today: NaiveDate,
) -> anyhow::Result<Outcome> {
    let outcome = match command {
        Command::List => Outcome::Records(store.all()),
        Command::Show { id } => Outcome::Record(store.get(parse_id(&id)?)?),
        Command::Add(fields) => add(store, &fields, today)?,
        Command::Edit { id, fields } => edit(store, parse_id(&id)?, &fields, today)?,
        Command::Delete { id } => Outcome::Record(store.delete(parse_id(&id)?)?),
        Command::Search { term } => Outcome::Records(store.search(&term)),
        Command::Department { name } => Outcome::Records(store.filter_by_department(&name)),
        Command::Count => Outcome::Count(store.count()),
        Command::Stats { today: at } => Outcome::Stats(store.stats(at.unwrap_or(today))),
        Command::Validate { record } => {
            let value: Value =
                serde_json::from_str(&record).context("Record must be a JSON object")?;
            let Value::Object(data) = value else {
                anyhow::bail!("Record must be a JSON object");
            };
            Outcome::Checked(validate_employee_on(&data, today))
        }
        Command::Reset => {
            store.clear()?;
            Outcome::Cleared
        }
        Command::Export => Outcome::Snapshot(store.to_json()?),
    };
    Ok(outcome)
}

fn add(
    store: &mut EmployeeStore,
    fields: &EmployeeFields,
    today: NaiveDate,
) -> anyhow::Result<Outcome> {
    let form = sanitize_form(fields.submitted());
    let result = validate_employee_on(&form, today);
    if !result.is_valid {
        return Ok(Outcome::Invalid(result));
    }

    let text = |key: &str| form.get(key).and_then(Value::as_str).map(str::to_string);
    let input = NewEmployee {
        first_name: text("firstName").unwrap_or_default(),
        last_name: text("lastName").unwrap_or_default(),
        email: text("email").unwrap_or_default(),
        position: text("position").unwrap_or_default(),
        department: text("department").filter(|d| !d.is_empty()),
        salary: number(&form, "salary"),
        hire_date: text("hireDate").filter(|d| !d.is_empty()),
    };
    Ok(Outcome::Record(store.create(input)?))
}

fn edit(
    store: &mut EmployeeStore,
    id: i64,
    fields: &EmployeeFields,
    today: NaiveDate,
) -> anyhow::Result<Outcome> {
    let current = store.get(id)?;
    let changes = sanitize_form(fields.submitted());

    // Validate the record as it will look after the merge.
    let mut merged = match serde_json::to_value(current.to_new_employee())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(changes.clone());
    let result = validate_employee_on(&merged, today);
    if !result.is_valid {
        return Ok(Outcome::Invalid(result));
    }

    let text = |key: &str| changes.get(key).and_then(Value::as_str).map(str::to_string);
    let patch = EmployeePatch {
        first_name: text("firstName"),
        last_name: text("lastName"),
        email: text("email"),
        position: text("position"),
        department: text("department").filter(|d| !d.is_empty()),
        salary: number(&changes, "salary"),
        hire_date: text("hireDate"),
    };
    Ok(Outcome::Record(store.update(id, patch)?))
}

fn number(form: &Map<String, Value>, key: &str) -> Option<f64> {
    match form.get(key) {
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => coerce_number(v),
        None => None,
    }
}
