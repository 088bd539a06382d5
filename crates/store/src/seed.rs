//! Built-in seed dataset and seed file parsing.

use staffbook_core::employee::{NewEmployee, SeedEmployee};
use staffbook_core::error::CoreError;

/// The two sample employees loaded when no persisted state exists.
pub fn default_seed() -> Vec<SeedEmployee> {
    vec![
        SeedEmployee {
            id: 1,
            fields: NewEmployee {
                first_name: "John".into(),
                last_name: "Doe".into(),
                email: "john.doe@example.com".into(),
                position: "Software Engineer".into(),
                department: Some("Engineering".into()),
                salary: Some(75000.0),
                hire_date: Some("2023-01-15".into()),
            },
        },
        SeedEmployee {
            id: 2,
            fields: NewEmployee {
                first_name: "Jane".into(),
                last_name: "Smith".into(),
                email: "jane.smith@example.com".into(),
                position: "Product Manager".into(),
                department: Some("Product".into()),
                salary: Some(85000.0),
                hire_date: Some("2022-11-20".into()),
            },
        },
    ]
}

/// Parse a seed dataset: a JSON array of employee rows carrying their ids.
pub fn parse_seed(json: &str) -> Result<Vec<SeedEmployee>, CoreError> {
    serde_json::from_str(json)
        .map_err(|e| CoreError::Validation(format!("Invalid seed data: {e}")))
}
