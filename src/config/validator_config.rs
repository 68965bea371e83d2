//! In-memory validator configuration: the ordered rule set, message overrides
//! and evaluation mode

use crate::error::RuleError;
use crate::types::{EvaluationMode, RuleName, RuleParam};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Rules to apply, in the order they were configured
///
/// Order decides which failure is reported when several rules would fail.
/// Inserting a name that is already present replaces its parameter in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    entries: Vec<(RuleName, RuleParam)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, keeping the original position if it was already present
    pub fn insert(&mut self, name: RuleName, param: RuleParam) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = param,
            None => self.entries.push((name, param)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RuleParam> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == name)
            .map(|(_, param)| param)
    }

    /// Iterate over `(name, param)` pairs in configured order
    pub fn iter(&self) -> impl Iterator<Item = (&RuleName, &RuleParam)> {
        self.entries.iter().map(|(name, param)| (name, param))
    }

    pub fn names(&self) -> impl Iterator<Item = &RuleName> {
        self.entries.iter().map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, param) in &self.entries {
            map.serialize_entry(name, param)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleSetVisitor;

        impl<'de> Visitor<'de> for RuleSetVisitor {
            type Value = RuleSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of rule names to parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RuleSet, A::Error> {
                let mut rules = RuleSet::new();
                while let Some((name, param)) = access.next_entry::<RuleName, RuleParam>()? {
                    rules.insert(name, param);
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RuleSetVisitor)
    }
}

/// Everything a validator needs besides the value itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorConfig {
    rules: RuleSet,
    messages: HashMap<RuleName, String>,
    mode: EvaluationMode,
}

impl ValidatorConfig {
    /// Start building a configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// A configuration with the given rules, default messages and first-failure mode
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_messages(mut self, messages: HashMap<RuleName, String>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Per-rule message template overrides
    pub fn messages(&self) -> &HashMap<RuleName, String> {
        &self.messages
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }
}

/// Builder for [`ValidatorConfig`]
///
/// Invalid rule names are remembered and reported by [`ConfigBuilder::build`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    rules: RuleSet,
    messages: HashMap<RuleName, String>,
    mode: EvaluationMode,
    invalid: Option<String>,
}

impl ConfigBuilder {
    /// Append a rule; order of calls is evaluation order
    pub fn rule(mut self, name: &str, param: impl Into<RuleParam>) -> Self {
        match RuleName::new(name) {
            Some(name) => self.rules.insert(name, param.into()),
            None => self.remember_invalid(name),
        }
        self
    }

    /// Override the failure message template for a rule
    pub fn message(mut self, name: &str, template: impl Into<String>) -> Self {
        match RuleName::new(name) {
            Some(name) => {
                self.messages.insert(name, template.into());
            }
            None => self.remember_invalid(name),
        }
        self
    }

    pub fn mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Finish the configuration
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidName` for the first invalid rule name passed
    /// to [`rule`](Self::rule) or [`message`](Self::message).
    pub fn build(self) -> Result<ValidatorConfig, RuleError> {
        if let Some(name) = self.invalid {
            return Err(RuleError::InvalidName(name));
        }
        Ok(ValidatorConfig {
            rules: self.rules,
            messages: self.messages,
            mode: self.mode,
        })
    }

    fn remember_invalid(&mut self, name: &str) {
        if self.invalid.is_none() {
            self.invalid = Some(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let config = ValidatorConfig::builder()
            .rule("required", true)
            .rule("min", 5)
            .rule("max", 20)
            .rule("match", "EMAIL")
            .build()
            .unwrap();

        let names: Vec<&str> = config.rules().names().map(RuleName::as_str).collect();
        assert_eq!(names, vec!["required", "min", "max", "match"]);
        assert_eq!(config.rules().get("min"), Some(&RuleParam::Integer(5)));
        assert_eq!(config.mode(), EvaluationMode::FirstFailure);
    }

    #[test]
    fn test_reinserting_keeps_position() {
        let config = ValidatorConfig::builder()
            .rule("min", 1)
            .rule("max", 2)
            .rule("min", 3)
            .build()
            .unwrap();

        let rules: Vec<(&str, &RuleParam)> =
            config.rules().iter().map(|(n, p)| (n.as_str(), p)).collect();
        assert_eq!(
            rules,
            vec![("min", &RuleParam::Integer(3)), ("max", &RuleParam::Integer(2))]
        );
    }

    #[test]
    fn test_builder_reports_invalid_name() {
        let result = ValidatorConfig::builder()
            .rule("ok", true)
            .rule("not ok", true)
            .message("also bad!", "x")
            .build();

        match result {
            Err(RuleError::InvalidName(name)) => assert_eq!(name, "not ok"),
            other => panic!("Expected InvalidName, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_messages_and_mode() {
        let config = ValidatorConfig::builder()
            .rule("min", 5)
            .message("min", "needs %rule%")
            .mode(EvaluationMode::CollectAll)
            .build()
            .unwrap();

        let min = RuleName::new("min").unwrap();
        assert_eq!(config.messages().get(&min).map(String::as_str), Some("needs %rule%"));
        assert_eq!(config.mode(), EvaluationMode::CollectAll);
    }

    #[test]
    fn test_empty_config() {
        let config = ValidatorConfig::default();
        assert!(config.rules().is_empty());
        assert!(config.messages().is_empty());
    }

    #[test]
    fn test_rule_set_deserialize_keeps_document_order() {
        let rules: RuleSet = toml::from_str(
            r#"
max = 20
required = true
match = "EMAIL"
min = 5
"#,
        )
        .unwrap();

        let names: Vec<&str> = rules.names().map(RuleName::as_str).collect();
        assert_eq!(names, vec!["max", "required", "match", "min"]);
    }

    #[test]
    fn test_rule_set_rejects_invalid_name() {
        let result: Result<RuleSet, _> = serde_json::from_str(r#"{"bad name": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_set_serializes_in_order() {
        let config = ValidatorConfig::builder()
            .rule("min", 5)
            .rule("match", "EMAIL")
            .build()
            .unwrap();
        let json = serde_json::to_string(config.rules()).unwrap();
        assert_eq!(json, r#"{"min":5,"match":"EMAIL"}"#);
    }
}
