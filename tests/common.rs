//! Test utilities for fieldrules integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// E-mail field configuration used across tests
pub const EMAIL_CONFIG: &str = r#"
[fieldrules]
version = "1"

[rules]
required = true
min = 5
max = 20
match = "EMAIL"
"#;

/// Write `content` to `dir/fieldrules.toml` and return its path
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("fieldrules.toml");
    fs::write(&path, content).expect("write fieldrules.toml");
    path
}
