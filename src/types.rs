#![forbid(unsafe_code)]

//! Core domain types for fieldrules
//!
//! This module defines the fundamental types shared by the registry, the
//! evaluation engine and the configuration layer.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A validated rule name
///
/// Rule names must be non-empty and contain only ASCII alphanumeric characters,
/// hyphens, and underscores. Comparison is case-sensitive: `min` and `Min` are
/// different rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleName(String);

impl RuleName {
    /// Creates a new RuleName, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(RuleName(name))
    }

    /// Returns the rule name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RuleName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleName::new(value.clone()).ok_or_else(|| format!("Invalid rule name '{}'", value))
    }
}

impl From<RuleName> for String {
    fn from(name: RuleName) -> Self {
        name.0
    }
}

/// The value a rule is configured with
///
/// `min = 5` carries an integer, `match = "EMAIL"` a string and
/// `required = true` a boolean. Which variants a rule accepts is up to the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleParam {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RuleParam {
    /// Numeric view of the parameter, if it is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RuleParam::Integer(n) => Some(*n as f64),
            RuleParam::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// String view of the parameter, if it is a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleParam::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            RuleParam::Bool(_) => "boolean",
            RuleParam::Integer(_) => "integer",
            RuleParam::Float(_) => "float",
            RuleParam::Text(_) => "string",
        }
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParam::Bool(b) => write!(f, "{}", b),
            RuleParam::Integer(n) => write!(f, "{}", n),
            RuleParam::Float(n) => write!(f, "{}", n),
            RuleParam::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for RuleParam {
    fn from(value: bool) -> Self {
        RuleParam::Bool(value)
    }
}

impl From<i64> for RuleParam {
    fn from(value: i64) -> Self {
        RuleParam::Integer(value)
    }
}

impl From<i32> for RuleParam {
    fn from(value: i32) -> Self {
        RuleParam::Integer(i64::from(value))
    }
}

impl From<usize> for RuleParam {
    fn from(value: usize) -> Self {
        RuleParam::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for RuleParam {
    fn from(value: f64) -> Self {
        RuleParam::Float(value)
    }
}

impl From<&str> for RuleParam {
    fn from(value: &str) -> Self {
        RuleParam::Text(value.to_string())
    }
}

impl From<String> for RuleParam {
    fn from(value: String) -> Self {
        RuleParam::Text(value)
    }
}

/// How many failures a validation run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// Stop at the first failing rule
    #[default]
    FirstFailure,
    /// Evaluate every rule and report each failure
    CollectAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_name_validation() {
        assert!(RuleName::new("required").is_some());
        assert!(RuleName::new("no-spaces").is_some());
        assert!(RuleName::new("rule_123").is_some());
        assert!(RuleName::new("").is_none());
        assert!(RuleName::new("two words").is_none());
        assert!(RuleName::new("at@sign").is_none());
    }

    #[test]
    fn test_rule_name_is_case_sensitive() {
        assert_ne!(RuleName::new("min"), RuleName::new("Min"));
    }

    #[test]
    fn test_rule_param_display() {
        assert_eq!(RuleParam::from(5).to_string(), "5");
        assert_eq!(RuleParam::from(2.5).to_string(), "2.5");
        assert_eq!(RuleParam::from(true).to_string(), "true");
        assert_eq!(RuleParam::from("EMAIL").to_string(), "EMAIL");
    }

    #[test]
    fn test_rule_param_views() {
        assert_eq!(RuleParam::from(5).as_number(), Some(5.0));
        assert_eq!(RuleParam::from(1.5).as_number(), Some(1.5));
        assert_eq!(RuleParam::from("x").as_number(), None);
        assert_eq!(RuleParam::from("x").as_text(), Some("x"));
        assert_eq!(RuleParam::from(true).as_text(), None);
        assert_eq!(RuleParam::from(true).kind(), "boolean");
    }

    #[test]
    fn test_rule_param_untagged_deserialize() {
        let params: Vec<RuleParam> = serde_json::from_str(r#"[true, 5, 2.5, "EMAIL"]"#).unwrap();
        assert_eq!(
            params,
            vec![
                RuleParam::Bool(true),
                RuleParam::Integer(5),
                RuleParam::Float(2.5),
                RuleParam::Text("EMAIL".to_string()),
            ]
        );
    }

    #[test]
    fn test_evaluation_mode_names() {
        let mode: EvaluationMode = serde_json::from_str(r#""collect-all""#).unwrap();
        assert_eq!(mode, EvaluationMode::CollectAll);
        assert_eq!(EvaluationMode::default(), EvaluationMode::FirstFailure);
    }
}
