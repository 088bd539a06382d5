use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Manage employee records from the command line.
#[derive(Debug, Parser)]
#[command(name = "staffbook", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding persisted records (overrides STAFFBOOK_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage slot name (overrides STAFFBOOK_SLOT)
    #[arg(long, global = true)]
    pub slot: Option<String>,

    /// Seed file used when the slot is empty (overrides STAFFBOOK_SEED_PATH)
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every employee
    List,
    /// Show one employee
    Show { id: String },
    /// Validate and add a new employee
    Add(EmployeeFields),
    /// Validate and update an existing employee
    Edit {
        id: String,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Permanently delete an employee
    Delete { id: String },
    /// Case-insensitive search over names, email, position and department
    Search {
        #[arg(default_value = "")]
        term: String,
    },
    /// Employees in one department (case-insensitive)
    Department {
        #[arg(default_value = "")]
        name: String,
    },
    /// Number of stored employees
    Count,
    /// Dashboard figures
    Stats {
        /// Reference date for "this month" (default: today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Validate a JSON employee record without storing it
    Validate { record: String },
    /// Remove every employee and restart ids at 1
    Reset,
    /// Print the persisted JSON snapshot
    Export,
}

/// Employee form fields. Every flag is optional so `edit` can send a partial
/// update; `add` relies on validation to report missing ones.
#[derive(Debug, Clone, Default, Args)]
pub struct EmployeeFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long)]
    pub hire_date: Option<String>,
}

impl EmployeeFields {
    /// Submitted fields as `(camelCase name, raw value)` pairs.
    pub fn submitted(&self) -> Vec<(&'static str, &str)> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("position", &self.position),
            ("department", &self.department),
            ("salary", &self.salary),
            ("hireDate", &self.hire_date),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}
