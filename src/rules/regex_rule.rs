#![forbid(unsafe_code)]

//! Regex-backed custom rules
//!
//! A `RegexRule` is a named rule whose test is a single regular expression,
//! declared in the `[custom.<name>]` tables of `fieldrules.toml`.

use crate::error::RuleError;
use crate::rules::{Rule, RuleInput};
use crate::types::{RuleName, RuleParam};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// TOML structure for a custom rule definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexRuleDefinition {
    /// What the rule checks, shown by `fieldrules rules`
    #[serde(default)]
    pub description: Option<String>,

    /// Regex the value must match
    pub pattern: String,

    /// Compile the pattern case-insensitively
    #[serde(default)]
    pub case_insensitive: bool,
}

/// A rule that passes when the value matches its regular expression
pub struct RegexRule {
    name: RuleName,
    description: String,
    pattern: Regex,
}

impl std::fmt::Debug for RegexRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl RegexRule {
    /// Build a RegexRule from its definition
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn from_definition(name: RuleName, def: &RegexRuleDefinition) -> Result<Self, RuleError> {
        let pattern = RegexBuilder::new(&def.pattern)
            .case_insensitive(def.case_insensitive)
            .build()
            .map_err(|e| {
                RuleError::InvalidRegex(format!(
                    "Failed to compile pattern '{}' for rule '{}': {}",
                    def.pattern, name, e
                ))
            })?;

        let description = def
            .description
            .clone()
            .unwrap_or_else(|| format!("Value must match {}", def.pattern));

        Ok(Self {
            name,
            description,
            pattern,
        })
    }
}

impl Rule for RegexRule {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn test(&self, input: &RuleInput<'_>, _param: &RuleParam) -> Result<bool, RuleError> {
        Ok(self.pattern.is_match(input.value))
    }
}
