//! Integration tests for employee CRUD and query operations.
//!
//! Every test builds its own store from the built-in seed, so no state leaks
//! between cases.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use staffbook_core::employee::{EmployeePatch, NewEmployee};
use staffbook_core::error::CoreError;
use staffbook_core::validation::validate_employee_on;
use staffbook_store::seed::default_seed;
use staffbook_store::EmployeeStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seeded() -> EmployeeStore {
    EmployeeStore::with_seed(default_seed()).expect("default seed is valid")
}

fn alice() -> NewEmployee {
    NewEmployee {
        first_name: "Alice".into(),
        last_name: "Johnson".into(),
        email: "alice.johnson@example.com".into(),
        position: "UX Designer".into(),
        department: Some("Design".into()),
        salary: Some(70000.0),
        hire_date: Some("2023-03-15".into()),
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[test]
fn create_assigns_next_id_and_equal_timestamps() {
    let mut store = seeded();
    let created = store.create(alice()).unwrap();

    assert_eq!(created.id, 3);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.to_new_employee(), alice());
    assert_eq!(store.count(), 3);

    let fetched = store.get(created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn create_rejects_non_object_payload() {
    let mut store = seeded();
    for payload in [json!(null), json!("Alice"), json!([1, 2])] {
        assert_matches!(
            store.create_from_value(&payload),
            Err(CoreError::Input(msg)) if msg == "Employee data is required"
        );
    }
    assert_eq!(store.count(), 2);
}

#[test]
fn create_reports_first_missing_required_field() {
    let mut store = seeded();
    assert_matches!(
        store.create_from_value(&json!({"firstName": "Alice"})),
        Err(CoreError::Validation(msg)) if msg == "lastName is required"
    );
    assert_matches!(
        store.create_from_value(&json!({
            "firstName": "",
            "lastName": "Wilson",
            "email": "bob.wilson@example.com",
            "position": "Developer"
        })),
        Err(CoreError::Validation(msg)) if msg == "firstName is required"
    );
    assert_matches!(
        store.create(NewEmployee {
            position: "   ".into(),
            ..alice()
        }),
        Err(CoreError::Validation(msg)) if msg == "position is required"
    );
}

#[test]
fn create_treats_null_required_field_as_missing() {
    let mut store = seeded();
    assert_matches!(
        store.create_from_value(&json!({
            "firstName": null,
            "lastName": "Wilson",
            "email": "bob.wilson@example.com",
            "position": "Developer"
        })),
        Err(CoreError::Validation(msg)) if msg == "firstName is required"
    );
    assert_eq!(store.count(), 2);
}

#[test]
fn validated_form_payload_is_accepted_by_create() {
    let mut store = seeded();
    let payload = json!({
        "firstName": "Bob",
        "lastName": "Wilson",
        "email": "bob.wilson@example.com",
        "position": "Developer",
        "department": "Engineering",
        "salary": "75000",
        "hireDate": "2023-05-01"
    });
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    assert!(validate_employee_on(payload.as_object().unwrap(), today).is_valid);

    let created = store.create_from_value(&payload).unwrap();
    assert_eq!(created.salary, Some(75000.0));

    let updated = store
        .update_from_value(created.id, &json!({"salary": "80000.50"}))
        .unwrap();
    assert_eq!(updated.salary, Some(80000.5));

    let unchanged = store
        .update_from_value(created.id, &json!({"salary": ""}))
        .unwrap();
    assert_eq!(unchanged.salary, Some(80000.5));
}

#[test]
fn create_rejects_duplicate_email() {
    let mut store = seeded();
    let result = store.create_from_value(&json!({
        "firstName": "Bob",
        "lastName": "Wilson",
        "email": "john.doe@example.com",
        "position": "Dev"
    }));
    assert_matches!(
        result,
        Err(CoreError::Conflict(msg)) if msg == "Employee with this email already exists"
    );
    assert_eq!(store.count(), 2);
    assert_eq!(store.next_id(), 3);
}

#[test]
fn duplicate_email_check_is_case_sensitive() {
    let mut store = seeded();
    let created = store
        .create(NewEmployee {
            email: "John.Doe@example.com".into(),
            ..alice()
        })
        .unwrap();
    assert_eq!(created.email, "John.Doe@example.com");
}

#[test]
fn ids_are_never_reused_after_delete() {
    let mut store = seeded();
    let first = store.create(alice()).unwrap();
    store.delete(first.id).unwrap();
    let second = store.create(alice()).unwrap();
    assert_eq!(second.id, first.id + 1);
}

// ---------------------------------------------------------------------------
// read
// ---------------------------------------------------------------------------

#[test]
fn all_returns_insertion_order() {
    let mut store = seeded();
    store.create(alice()).unwrap();
    let emails: Vec<String> = store.all().into_iter().map(|e| e.email).collect();
    assert_eq!(
        emails,
        [
            "john.doe@example.com",
            "jane.smith@example.com",
            "alice.johnson@example.com"
        ]
    );
}

#[test]
fn returned_records_are_independent_copies() {
    let store = seeded();
    let mut copy = store.get(1).unwrap();
    copy.first_name = "Mallory".into();
    let mut list = store.all();
    list.clear();

    assert_eq!(store.get(1).unwrap().first_name, "John");
    assert_eq!(store.count(), 2);
}

#[test]
fn get_requires_id_and_existing_record() {
    let store = seeded();
    assert_matches!(
        store.get(0),
        Err(CoreError::Input(msg)) if msg == "Employee ID is required"
    );
    assert_matches!(
        store.get(999),
        Err(CoreError::NotFound(msg)) if msg == "Employee not found"
    );
    assert_eq!(store.get(2).unwrap().first_name, "Jane");
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[test]
fn update_merges_fields_and_refreshes_updated_at() {
    let mut store = seeded();
    let before = store.get(1).unwrap();

    let updated = store
        .update(
            1,
            EmployeePatch {
                position: Some("Senior Software Engineer".into()),
                salary: Some(95000.0),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.position, "Senior Software Engineer");
    assert_eq!(updated.salary, Some(95000.0));
    assert_eq!(updated.first_name, before.first_name);
    assert_eq!(updated.department, before.department);
    assert_eq!(updated.created_at, before.created_at);
    assert!(updated.updated_at >= before.updated_at);
    assert_eq!(store.get(1).unwrap(), updated);
}

#[test]
fn empty_update_preserves_fields() {
    let mut store = seeded();
    let before = store.get(2).unwrap();
    let updated = store.update(2, EmployeePatch::default()).unwrap();

    assert_eq!(updated.to_new_employee(), before.to_new_employee());
    assert_eq!(updated.id, before.id);
    assert!(updated.updated_at >= before.updated_at);
}

#[test]
fn update_with_own_email_is_allowed() {
    let mut store = seeded();
    let updated = store
        .update_from_value(1, &json!({"email": "john.doe@example.com", "lastName": "Doe-Ray"}))
        .unwrap();
    assert_eq!(updated.last_name, "Doe-Ray");
}

#[test]
fn update_to_taken_email_conflicts() {
    let mut store = seeded();
    assert_matches!(
        store.update(
            1,
            EmployeePatch {
                email: Some("jane.smith@example.com".into()),
                ..Default::default()
            }
        ),
        Err(CoreError::Conflict(msg)) if msg == "Employee with this email already exists"
    );
    assert_eq!(store.get(1).unwrap().email, "john.doe@example.com");
}

#[test]
fn update_argument_checks_run_in_order() {
    let mut store = seeded();
    assert_matches!(
        store.update_from_value(0, &json!(null)),
        Err(CoreError::Input(msg)) if msg == "Employee ID is required"
    );
    assert_matches!(
        store.update_from_value(1, &json!(null)),
        Err(CoreError::Input(msg)) if msg == "Update data is required"
    );
    assert_matches!(
        store.update_from_value(999, &json!({"position": "Boss"})),
        Err(CoreError::NotFound(_))
    );
}

#[test]
fn update_cannot_blank_a_required_field() {
    let mut store = seeded();
    assert_matches!(
        store.update_from_value(1, &json!({"firstName": "  "})),
        Err(CoreError::Validation(msg)) if msg == "firstName is required"
    );
    assert_eq!(store.get(1).unwrap().first_name, "John");
}

#[test]
fn update_with_null_required_field_is_rejected() {
    let mut store = seeded();
    assert_matches!(
        store.update_from_value(2, &json!({"lastName": null})),
        Err(CoreError::Validation(msg)) if msg == "lastName is required"
    );
    assert_eq!(store.get(2).unwrap().last_name, "Smith");
}

#[test]
fn update_ignores_id_and_timestamps_in_payload() {
    let mut store = seeded();
    let before = store.get(1).unwrap();
    let updated = store
        .update_from_value(1, &json!({"id": 42, "createdAt": "2000-01-01T00:00:00Z"}))
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.created_at, before.created_at);
}

// ---------------------------------------------------------------------------
// delete / clear
// ---------------------------------------------------------------------------

#[test]
fn delete_removes_exactly_one_record() {
    let mut store = seeded();
    let removed = store.delete(1).unwrap();

    assert_eq!(removed.email, "john.doe@example.com");
    assert_eq!(store.count(), 1);
    assert_matches!(store.get(1), Err(CoreError::NotFound(_)));
    assert_matches!(store.delete(1), Err(CoreError::NotFound(_)));
    assert_matches!(store.delete(0), Err(CoreError::Input(_)));
}

#[test]
fn clear_resets_id_assignment() {
    let mut store = seeded();
    store.clear().unwrap();
    assert_eq!(store.count(), 0);

    let created = store.create(alice()).unwrap();
    assert_eq!(created.id, 1);
}

// ---------------------------------------------------------------------------
// search / filter / stats
// ---------------------------------------------------------------------------

#[test]
fn blank_search_returns_everything() {
    let store = seeded();
    assert_eq!(store.search(""), store.all());
    assert_eq!(store.search("   "), store.all());
}

#[test]
fn search_matches_any_field_case_insensitively() {
    let mut store = seeded();
    store.create(alice()).unwrap();

    let names = |term: &str| -> Vec<String> {
        store.search(term).into_iter().map(|e| e.first_name).collect()
    };
    assert_eq!(names("JOHN"), ["John", "Alice"]);
    assert_eq!(names("smith"), ["Jane"]);
    assert_eq!(names("product"), ["Jane"]);
    assert_eq!(names("design"), ["Alice"]);
    assert_eq!(names("@example.com"), ["John", "Jane", "Alice"]);
    assert!(names("nobody").is_empty());
}

#[test]
fn search_tolerates_missing_department() {
    let mut store = EmployeeStore::new();
    store
        .create(NewEmployee {
            department: None,
            ..alice()
        })
        .unwrap();
    assert_eq!(store.search("alice").len(), 1);
    assert!(store.search("design").is_empty());
}

#[test]
fn filter_by_department_ignores_case() {
    let store = seeded();
    let engineering = store.filter_by_department("engineering");
    assert_eq!(engineering.len(), 1);
    assert_eq!(engineering[0].department.as_deref(), Some("Engineering"));
    assert!(store.filter_by_department("Engine").is_empty());
    assert_eq!(store.filter_by_department(""), store.all());
}

#[test]
fn stats_reflect_current_collection() {
    let mut store = seeded();
    store
        .create(NewEmployee {
            hire_date: Some("2024-06-03".into()),
            ..alice()
        })
        .unwrap();

    let stats = store.stats(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
    assert_eq!(stats.total_employees, 3);
    assert_eq!(stats.departments, 3);
    assert_eq!(stats.new_hires_this_month, 1);
}
