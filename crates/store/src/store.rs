//! The employee record store: authoritative collection plus CRUD and queries.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use staffbook_core::employee::{Employee, EmployeePatch, NewEmployee, SeedEmployee};
use staffbook_core::error::CoreError;
use staffbook_core::types::EmployeeId;

use crate::snapshot;
use crate::stats::{dashboard_stats, DashboardStats};
use crate::storage::KeyValueStorage;

/// Slot name used for the persisted collection unless configured otherwise.
pub const DEFAULT_SLOT: &str = "employees";

const ID_REQUIRED: &str = "Employee ID is required";
const NOT_FOUND: &str = "Employee not found";
const DUPLICATE_EMAIL: &str = "Employee with this email already exists";
const IDS_EXHAUSTED: &str = "No employee ids left to assign";

fn not_found() -> CoreError {
    CoreError::NotFound(NOT_FOUND.to_string())
}

fn duplicate_email() -> CoreError {
    CoreError::Conflict(DUPLICATE_EMAIL.to_string())
}

fn required(field: &str) -> CoreError {
    CoreError::Validation(format!("{field} is required"))
}

/// Normalize a textual id the way form inputs send it.
///
/// Leading whitespace and a sign are allowed, and only the leading run of
/// digits counts (`"12abc"` is 12). Blank input is an input error; text with
/// no leading digits, or a zero id, cannot match any record.
pub fn parse_id(raw: &str) -> Result<EmployeeId, CoreError> {
    let trimmed = raw.trim_start();
    if trimmed.trim_end().is_empty() {
        return Err(CoreError::Input(ID_REQUIRED.to_string()));
    }

    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: EmployeeId = rest[..digits_end].parse().map_err(|_| not_found())?;
    let id = if negative { -magnitude } else { magnitude };

    if id == 0 {
        return Err(not_found());
    }
    Ok(id)
}

struct Backend {
    storage: Box<dyn KeyValueStorage>,
    slot: String,
}

/// Owns the employee collection and enforces its invariants.
///
/// Every read returns owned clones. Every mutation builds the next state,
/// writes it through to the attached storage (if any), and only then swaps
/// it in, so a failed write leaves the store unchanged.
pub struct EmployeeStore {
    employees: Vec<Employee>,
    next_id: EmployeeId,
    backend: Option<Backend>,
}

impl fmt::Debug for EmployeeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeStore")
            .field("employees", &self.employees.len())
            .field("next_id", &self.next_id)
            .field("slot", &self.backend.as_ref().map(|b| b.slot.as_str()))
            .finish()
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeStore {
    // -- construction --------------------------------------------------------

    /// An empty, unpersisted store; ids start at 1.
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            next_id: 1,
            backend: None,
        }
    }

    /// An unpersisted store holding `seed`, with both timestamps of every row
    /// set to now.
    pub fn with_seed(seed: Vec<SeedEmployee>) -> Result<Self, CoreError> {
        let now = Utc::now();
        let records = seed.into_iter().map(|row| row.into_employee(now)).collect();
        Self::from_records(records)
    }

    /// An unpersisted store holding already-stamped records.
    ///
    /// Fails if the records break id or email uniqueness, carry a
    /// non-positive id, or have a blank required field.
    pub fn from_records(records: Vec<Employee>) -> Result<Self, CoreError> {
        check_collection(&records)?;
        let max_id = records.iter().map(|e| e.id).max().unwrap_or(0);
        let next_id = max_id.checked_add(1).ok_or_else(|| {
            CoreError::Validation(format!("Employee id {max_id} is out of range"))
        })?;
        Ok(Self {
            employees: records,
            next_id,
            backend: None,
        })
    }

    /// Open a store backed by `storage`.
    ///
    /// If `slot` already holds a snapshot the collection is restored from
    /// it; otherwise `seed` is loaded and written through immediately.
    pub fn open<S>(storage: S, slot: &str, seed: Vec<SeedEmployee>) -> Result<Self, CoreError>
    where
        S: KeyValueStorage + 'static,
    {
        let (mut store, seeded) = match storage.get(slot)? {
            Some(blob) => {
                let records = snapshot::decode(&blob)?;
                tracing::debug!(slot, count = records.len(), "Restored employees from storage");
                (Self::from_records(records)?, false)
            }
            None => {
                tracing::debug!(slot, count = seed.len(), "No stored employees, loading seed");
                let store = Self::with_seed(seed).inspect_err(|e| {
                    tracing::warn!(error = %e, "Seed data rejected");
                })?;
                (store, true)
            }
        };
        store.backend = Some(Backend {
            storage: Box::new(storage),
            slot: slot.to_string(),
        });
        if seeded {
            let records = store.employees.clone();
            store.commit(records, store.next_id)?;
        }
        Ok(store)
    }

    /// The attached storage backend, if any.
    pub fn storage(&self) -> Option<&dyn KeyValueStorage> {
        self.backend.as_ref().map(|b| &*b.storage)
    }

    /// The slot the collection is persisted under, if backed.
    pub fn slot(&self) -> Option<&str> {
        self.backend.as_ref().map(|b| b.slot.as_str())
    }

    // -- commands ------------------------------------------------------------

    /// Insert a new employee and return a copy of the stored record.
    ///
    /// Required fields are checked in order (`firstName`, `lastName`,
    /// `email`, `position`) and the first blank one is reported. An email
    /// already on file (exact, case-sensitive match) is a conflict.
    pub fn create(&mut self, input: NewEmployee) -> Result<Employee, CoreError> {
        if let Some(field) = input.first_blank_required() {
            return Err(required(field));
        }
        if self.email_taken(&input.email) {
            return Err(duplicate_email());
        }

        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| CoreError::Internal(IDS_EXHAUSTED.to_string()))?;
        let employee = Employee::from_new(self.next_id, input, Utc::now());
        let mut next = self.employees.clone();
        next.push(employee.clone());
        self.commit(next, next_id)?;

        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    /// [`create`](Self::create) from a loosely-typed JSON payload.
    pub fn create_from_value(&mut self, data: &Value) -> Result<Employee, CoreError> {
        if !data.is_object() {
            return Err(CoreError::Input("Employee data is required".to_string()));
        }
        let input: NewEmployee = serde_json::from_value(data.clone())
            .map_err(|e| CoreError::Validation(format!("Invalid employee data: {e}")))?;
        self.create(input)
    }

    /// Merge `patch` over an existing employee and return the updated copy.
    ///
    /// A new email is checked for conflicts only when it differs from the
    /// record's current one, so re-sending the same email is allowed. The
    /// merged record must still have every required field.
    pub fn update(&mut self, id: EmployeeId, patch: EmployeePatch) -> Result<Employee, CoreError> {
        check_id(id)?;
        let index = self.index_of(id)?;
        self.apply_update(index, patch)
    }

    /// [`update`](Self::update) from a loosely-typed JSON payload.
    pub fn update_from_value(&mut self, id: EmployeeId, data: &Value) -> Result<Employee, CoreError> {
        check_id(id)?;
        if !data.is_object() {
            return Err(CoreError::Input("Update data is required".to_string()));
        }
        let index = self.index_of(id)?;
        let patch: EmployeePatch = serde_json::from_value(data.clone())
            .map_err(|e| CoreError::Validation(format!("Invalid employee data: {e}")))?;
        self.apply_update(index, patch)
    }

    fn apply_update(&mut self, index: usize, patch: EmployeePatch) -> Result<Employee, CoreError> {
        let current = &self.employees[index];
        if let Some(email) = patch.email.as_deref() {
            if !email.is_empty() && email != current.email && self.email_taken(email) {
                return Err(duplicate_email());
            }
        }

        let mut updated = current.clone();
        updated.apply(patch, Utc::now());
        if let Some(field) = updated.first_blank_required() {
            return Err(required(field));
        }

        let mut next = self.employees.clone();
        next[index] = updated.clone();
        self.commit(next, self.next_id)?;

        tracing::info!(employee_id = updated.id, "Employee updated");
        Ok(updated)
    }

    /// Permanently remove an employee and return the removed record.
    pub fn delete(&mut self, id: EmployeeId) -> Result<Employee, CoreError> {
        check_id(id)?;
        let index = self.index_of(id)?;

        let mut next = self.employees.clone();
        let removed = next.remove(index);
        self.commit(next, self.next_id)?;

        tracing::info!(employee_id = removed.id, "Employee deleted");
        Ok(removed)
    }

    /// Drop every record and restart id assignment at 1.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        let removed = self.employees.len();
        self.commit(Vec::new(), 1)?;
        tracing::info!(removed, "Employee store cleared");
        Ok(())
    }

    // -- queries -------------------------------------------------------------

    /// Every record, in insertion order.
    pub fn all(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    /// A single record by id.
    pub fn get(&self, id: EmployeeId) -> Result<Employee, CoreError> {
        check_id(id)?;
        let index = self.index_of(id)?;
        Ok(self.employees[index].clone())
    }

    /// Case-insensitive substring search over names, email, position and
    /// department. A blank term returns every record.
    pub fn search(&self, term: &str) -> Vec<Employee> {
        if term.trim().is_empty() {
            return self.all();
        }
        let needle = term.to_lowercase();
        self.employees
            .iter()
            .filter(|e| {
                [
                    Some(e.first_name.as_str()),
                    Some(e.last_name.as_str()),
                    Some(e.email.as_str()),
                    Some(e.position.as_str()),
                    e.department.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Records whose department equals `department`, ignoring case. An empty
    /// name returns every record.
    pub fn filter_by_department(&self, department: &str) -> Vec<Employee> {
        if department.is_empty() {
            return self.all();
        }
        let wanted = department.to_lowercase();
        self.employees
            .iter()
            .filter(|e| {
                e.department
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase() == wanted)
            })
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.employees.len()
    }

    /// Id the next created record will receive.
    pub fn next_id(&self) -> EmployeeId {
        self.next_id
    }

    /// Dashboard figures as of `today`.
    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        dashboard_stats(&self.employees, today)
    }

    /// The whole collection as a JSON array snapshot.
    pub fn to_json(&self) -> Result<String, CoreError> {
        snapshot::encode(&self.employees)
    }

    // -- internals -----------------------------------------------------------

    fn index_of(&self, id: EmployeeId) -> Result<usize, CoreError> {
        self.employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(not_found)
    }

    fn email_taken(&self, email: &str) -> bool {
        self.employees.iter().any(|e| e.email == email)
    }

    /// Persist `next` (when backed) and then make it the current state.
    fn commit(&mut self, next: Vec<Employee>, next_id: EmployeeId) -> Result<(), CoreError> {
        if let Some(backend) = self.backend.as_mut() {
            let blob = snapshot::encode(&next)?;
            backend.storage.set(&backend.slot, &blob)?;
            tracing::debug!(slot = %backend.slot, bytes = blob.len(), "Persisted employees");
        }
        self.employees = next;
        self.next_id = next_id;
        Ok(())
    }
}

fn check_id(id: EmployeeId) -> Result<(), CoreError> {
    if id == 0 {
        return Err(CoreError::Input(ID_REQUIRED.to_string()));
    }
    Ok(())
}

fn check_collection(records: &[Employee]) -> Result<(), CoreError> {
    let mut ids = HashSet::new();
    let mut emails = HashSet::new();
    for record in records {
        if record.id <= 0 {
            return Err(CoreError::Validation(format!(
                "Employee id must be positive (got {})",
                record.id
            )));
        }
        if !ids.insert(record.id) {
            return Err(CoreError::Conflict(format!(
                "Duplicate employee id {}",
                record.id
            )));
        }
        if let Some(field) = record.first_blank_required() {
            return Err(required(field));
        }
        if !emails.insert(record.email.as_str()) {
            return Err(duplicate_email());
        }
    }
    Ok(())
}
