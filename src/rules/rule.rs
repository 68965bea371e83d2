#![forbid(unsafe_code)]

//! Core Rule trait and related types for defining and executing rules

use crate::error::RuleError;
use crate::rules::PatternTable;
use crate::types::{RuleName, RuleParam};

/// Input provided to rules when they execute
///
/// This contains everything a rule may consult while testing a value.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// The value under validation
    pub value: &'a str,

    /// Named patterns available to pattern-matching rules
    pub patterns: &'a PatternTable,
}

/// Trait that all rules must implement
///
/// A rule is a named predicate over a string value, parameterized by the
/// value it is configured with. The trait is `Send + Sync` so validators can
/// be shared across threads.
pub trait Rule: Send + Sync {
    /// Returns the name this rule is registered under
    fn name(&self) -> &RuleName;

    /// Returns a human-readable description of what this rule checks
    fn description(&self) -> &str;

    /// Checks that `param` is usable by this rule
    ///
    /// Called for every configured rule before any rule is tested, so a
    /// configuration mistake is reported even when an earlier rule would fail.
    fn check_param(&self, _param: &RuleParam, _patterns: &PatternTable) -> Result<(), RuleError> {
        Ok(())
    }

    /// Tests the value in `input` against this rule
    ///
    /// `Ok(false)` is a validation failure. `Err` is reserved for
    /// configuration errors.
    fn test(&self, input: &RuleInput<'_>, param: &RuleParam) -> Result<bool, RuleError>;
}

/// Signature of a predicate registered with `add_rule`
pub type Predicate = dyn Fn(&RuleParam, &str) -> bool + Send + Sync;

/// A rule backed by a caller-supplied closure
pub struct FnRule {
    name: RuleName,
    predicate: Box<Predicate>,
}

impl FnRule {
    pub fn new<F>(name: RuleName, predicate: F) -> Self
    where
        F: Fn(&RuleParam, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            predicate: Box::new(predicate),
        }
    }
}

impl std::fmt::Debug for FnRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRule")
            .field("name", &self.name)
            .field("predicate", &"<closure>")
            .finish()
    }
}

impl Rule for FnRule {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn description(&self) -> &str {
        "Custom rule"
    }

    fn test(&self, input: &RuleInput<'_>, param: &RuleParam) -> Result<bool, RuleError> {
        Ok((self.predicate)(param, input.value))
    }
}
