#![forbid(unsafe_code)]

//! Rule registry mapping rule names to rules
//!
//! Each validator owns its own registry. A registry starts from the shared
//! built-in rules; registering a rule only changes that registry, never the
//! built-in set or any other validator.

use crate::error::RuleError;
use crate::rules::{FnRule, Rule, builtin_rules};
use crate::types::{RuleName, RuleParam};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for storing and looking up rules by name
///
/// Rules are stored as shared trait objects so that cloning a registry is
/// cheap and built-ins are never copied.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<RuleName, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in rules
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            registry.register(Arc::clone(rule));
        }
        registry
    }

    /// Register a rule under its own name
    ///
    /// An existing rule with the same name is replaced and returned.
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Option<Arc<dyn Rule>> {
        let name = rule.name().clone();
        let previous = self.rules.insert(name.clone(), rule);
        tracing::debug!(rule = %name, replaced = previous.is_some(), "registered rule");
        previous
    }

    /// Register a closure as the rule `name`
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidName` if `name` is not a valid rule name.
    pub fn add_rule<F>(&mut self, name: &str, predicate: F) -> Result<(), RuleError>
    where
        F: Fn(&RuleParam, &str) -> bool + Send + Sync + 'static,
    {
        let name = RuleName::new(name).ok_or_else(|| RuleError::InvalidName(name.to_string()))?;
        self.register(Arc::new(FnRule::new(name, predicate)));
        Ok(())
    }

    /// Get a rule by exact, case-sensitive name
    pub fn get_rule(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    /// Get a rule by name or fail with `RuleError::UnknownRule`
    pub fn resolve(&self, name: &str) -> Result<&dyn Rule, RuleError> {
        self.get_rule(name)
            .ok_or_else(|| RuleError::UnknownRule(name.to_string()))
    }

    /// Iterate over all rules, sorted by name
    pub fn iter_rules(&self) -> impl Iterator<Item = &dyn Rule> {
        let mut rules: Vec<&Arc<dyn Rule>> = self.rules.values().collect();
        rules.sort_by(|a, b| a.name().cmp(b.name()));
        rules.into_iter().map(|rule| rule.as_ref())
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.rules.keys().map(RuleName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}
