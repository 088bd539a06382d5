use std::path::PathBuf;

use staffbook_store::DEFAULT_SLOT;

/// CLI configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use; command-line flags
/// override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding the persisted slot files (default: `./data`).
    pub data_dir: PathBuf,
    /// Storage slot for the employee collection (default: `employees`).
    pub slot: String,
    /// Optional JSON seed file used when the slot is empty.
    pub seed_path: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `STAFFBOOK_DATA_DIR`  | `./data`    |
    /// | `STAFFBOOK_SLOT`      | `employees` |
    /// | `STAFFBOOK_SEED_PATH` | unset       |
    /// | `STAFFBOOK_LOG_JSON`  | `false`     |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty("STAFFBOOK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let slot = non_empty("STAFFBOOK_SLOT").unwrap_or_else(|| DEFAULT_SLOT.to_string());

        let seed_path = non_empty("STAFFBOOK_SEED_PATH").map(PathBuf::from);

        let log_json = non_empty("STAFFBOOK_LOG_JSON")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            data_dir,
            slot,
            seed_path,
            log_json,
        }
    }
}
