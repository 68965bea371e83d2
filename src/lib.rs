#![forbid(unsafe_code)]

//! Fieldrules: declarative validation of string values
//!
//! A [`Validator`] checks one value against an ordered set of named rules
//! (`required`, `min`, `max`, `match` and any custom rules) and reports the
//! first failing rule together with a formatted message.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, FieldrulesError, RuleError};

// Re-export core domain types for convenient access
pub use config::{ConfigBuilder, ValidatorConfig};
pub use engine::{BatchResult, BatchValidator, Failure, Outcome, Validator};
pub use rules::{PatternTable, Rule, RuleRegistry};
pub use types::{EvaluationMode, RuleName, RuleParam};
