//! Error types for fieldrules
//!
//! Configuration mistakes (a misspelled rule or pattern name, a parameter of
//! the wrong type) are errors. A value that fails a rule is not: that is a
//! normal [`Outcome`](crate::engine::Outcome) of validation.

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Well-formed TOML with invalid content
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Rule resolution and parameter errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A configured rule has no registered predicate
    #[error("Rule '{0}' can't be evaluated. It is not predefined; register it with add_rule")]
    UnknownRule(String),

    /// `match` referenced a pattern that is not in the pattern table
    #[error("There is no predefined pattern '{name}'. Available patterns: {available}")]
    UnknownPattern { name: String, available: String },

    /// A rule received a parameter it cannot use
    #[error("Invalid parameter for rule '{rule}': {message}")]
    InvalidParameter { rule: String, message: String },

    /// A rule name that is empty or contains unsupported characters
    #[error("Invalid rule name: '{0}'")]
    InvalidName(String),

    /// A pattern that failed to compile
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

/// Top-level error type for fieldrules
#[derive(Debug, thiserror::Error)]
pub enum FieldrulesError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
