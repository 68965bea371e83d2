//! Initialize a fieldrules configuration
//!
//! Writes a starter fieldrules.toml that validates e-mail addresses and shows
//! every section of the file format.

use std::fs;
use std::path::Path;

/// Default content for fieldrules.toml
pub const DEFAULT_FIELDRULES_TOML: &str = r#"[fieldrules]
version = "1"

# "first-failure" stops at the first failing rule,
# "collect-all" reports every failing rule
mode = "first-failure"

# Rules run in the order they are listed here
[rules]
required = true
min = 5
max = 64
match = "EMAIL"

# Message overrides; %rule% is the rule parameter, %value% the checked value
[messages]
# match = "'%value%' is not a valid %rule%"

# Extra named patterns for the match rule
[patterns]
# ZIP = "^[0-9]{5}$"

# Regex-backed custom rules, usable in [rules] as `name = true`
# [custom.no-spaces]
# description = "Value must not contain spaces"
# pattern = "^[^ ]*$"
# case_insensitive = false

[output]
format = "human"
"#;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// What init did with fieldrules.toml; each variant carries the file's path
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    /// The file did not exist and was written
    Created(String),
    /// The file already existed and was left alone
    Skipped(String),
    /// The file already existed and was replaced (`--force`)
    Overwritten(String),
}

impl InitOutcome {
    /// Path of the configuration file
    pub fn path(&self) -> &str {
        match self {
            InitOutcome::Created(path)
            | InitOutcome::Skipped(path)
            | InitOutcome::Overwritten(path) => path,
        }
    }
}

/// Run the init command in the current directory
///
/// # Arguments
/// * `force` - If true, overwrite an existing fieldrules.toml
pub fn run_init(force: bool) -> Result<InitOutcome, InitError> {
    run_init_in(Path::new("."), force)
}

/// Run the init command in `dir`
pub fn run_init_in(dir: &Path, force: bool) -> Result<InitOutcome, InitError> {
    if !dir.is_dir() {
        return Err(InitError::Path(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    handle_file(
        &dir.join(super::common::DEFAULT_CONFIG_PATH),
        DEFAULT_FIELDRULES_TOML,
        force,
    )
}

/// Write `content` to `path` unless it exists and `force` is off
fn handle_file(path: &Path, content: &str, force: bool) -> Result<InitOutcome, InitError> {
    let path_str = path_to_string(path)?;

    if !path.exists() {
        fs::write(path, content)?;
        Ok(InitOutcome::Created(path_str))
    } else if force {
        fs::write(path, content)?;
        Ok(InitOutcome::Overwritten(path_str))
    } else {
        Ok(InitOutcome::Skipped(path_str))
    }
}

/// Convert a path to a string representation
fn path_to_string(path: &Path) -> Result<String, InitError> {
    path.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| InitError::Path(format!("Invalid UTF-8 in path: {:?}", path)))
}
