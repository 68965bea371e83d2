#![forbid(unsafe_code)]

//! The validator: evaluates a configured rule set against one value
//!
//! Evaluation happens in two passes. The first resolves every configured rule
//! and checks its parameter, so configuration mistakes are returned as errors
//! before any rule runs. The second tests the rules in configured order and,
//! by default, stops at the first failure.

use crate::config::ValidatorConfig;
use crate::engine::message::{MessageTable, format_message};
use crate::error::RuleError;
use crate::rules::{PatternTable, Rule, RuleInput, RuleRegistry};
use crate::types::{EvaluationMode, RuleName, RuleParam};
use serde::Serialize;
use std::sync::Arc;

/// A rule that rejected the value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    /// Name of the failing rule
    pub rule: RuleName,

    /// Parameter the rule was configured with
    pub param: RuleParam,

    /// Formatted failure message
    pub message: String,
}

/// Result of a validation run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every rule passed
    Valid,
    /// A rule failed
    Invalid(Failure),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Valid => None,
            Outcome::Invalid(failure) => Some(failure),
        }
    }
}

/// Validates a single value against a [`ValidatorConfig`]
///
/// The validator owns its rule registry, so rules added with
/// [`add_rule`](Self::add_rule) are visible to this instance only.
#[derive(Debug, Clone)]
pub struct Validator {
    value: String,
    config: ValidatorConfig,
    registry: RuleRegistry,
    patterns: Arc<PatternTable>,
    messages: MessageTable,
    last_failure: Option<Failure>,
}

impl Validator {
    /// Create a validator for `value` using the built-in rules and patterns
    pub fn new(value: impl Into<String>, config: ValidatorConfig) -> Self {
        let messages = MessageTable::defaults().with_overrides(config.messages());
        Self {
            value: value.into(),
            config,
            registry: RuleRegistry::with_builtins(),
            patterns: PatternTable::builtin(),
            messages,
            last_failure: None,
        }
    }

    /// Use `patterns` instead of the built-in pattern table
    pub fn with_patterns(mut self, patterns: Arc<PatternTable>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Use `registry` instead of the built-in rules
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value; the previous failure is cleared
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.last_failure = None;
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Failure recorded by the last run, if it failed
    pub fn failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    /// Message of the last failure
    pub fn message(&self) -> Option<&str> {
        self.last_failure.as_ref().map(|f| f.message.as_str())
    }

    /// Name of the rule that failed the last run
    pub fn rule(&self) -> Option<&RuleName> {
        self.last_failure.as_ref().map(|f| &f.rule)
    }

    /// Register `predicate` as rule `name` on this validator
    ///
    /// An existing rule with the same name, built-in or not, is replaced.
    pub fn add_rule<F>(&mut self, name: &str, predicate: F) -> Result<(), RuleError>
    where
        F: Fn(&RuleParam, &str) -> bool + Send + Sync + 'static,
    {
        self.registry.add_rule(name, predicate)
    }

    /// Register a full [`Rule`] implementation on this validator
    pub fn register(&mut self, rule: impl Rule + 'static) {
        self.registry.register(Arc::new(rule));
    }

    /// Resolve every configured rule and check its parameter
    fn plan(&self) -> Result<Vec<(&dyn Rule, &RuleParam)>, RuleError> {
        let mut plan = Vec::with_capacity(self.config.rules().len());
        for (name, param) in self.config.rules().iter() {
            let rule = self.registry.resolve(name.as_str())?;
            rule.check_param(param, &self.patterns)?;
            plan.push((rule, param));
        }
        Ok(plan)
    }

    fn failure_for(&self, rule: &RuleName, param: &RuleParam) -> Failure {
        let param_text = param.to_string();
        let template = self.messages.resolve(rule.as_str());
        Failure {
            rule: rule.clone(),
            param: param.clone(),
            message: format_message(
                template,
                &[("rule", param_text.as_str()), ("value", self.value.as_str())],
            ),
        }
    }

    /// Test the planned rules, stopping after the first failure if `stop_early`
    fn evaluate(&self, stop_early: bool) -> Result<Vec<Failure>, RuleError> {
        let plan = self.plan()?;
        let input = RuleInput {
            value: &self.value,
            patterns: &self.patterns,
        };

        let mut failures = Vec::new();
        for (rule, param) in plan {
            let passed = rule.test(&input, param)?;
            tracing::trace!(rule = %rule.name(), %param, passed, "evaluated rule");
            if !passed {
                failures.push(self.failure_for(rule.name(), param));
                if stop_early {
                    break;
                }
            }
        }
        Ok(failures)
    }

    /// Validate the value, stopping at the first failing rule
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if a configured rule is unknown or misconfigured.
    /// A value that fails a rule is `Ok(Outcome::Invalid(..))`.
    ///
    /// Every configured rule is resolved before any rule runs, so a
    /// misconfigured later rule is reported even when an earlier rule would
    /// fail the value. The last failure is cleared when an error is returned.
    pub fn validate(&mut self) -> Result<Outcome, RuleError> {
        self.last_failure = None;
        let failure = self.evaluate(true)?.into_iter().next();
        self.last_failure = failure.clone();

        match failure {
            Some(failure) => {
                tracing::debug!(rule = %failure.rule, "validation failed");
                Ok(Outcome::Invalid(failure))
            }
            None => {
                tracing::debug!(rules = self.config.rules().len(), "validation passed");
                Ok(Outcome::Valid)
            }
        }
    }

    /// Validate the value against every rule and return all failures
    ///
    /// The first failure is recorded as the last failure.
    pub fn validate_all(&mut self) -> Result<Vec<Failure>, RuleError> {
        self.last_failure = None;
        let failures = self.evaluate(false)?;
        self.last_failure = failures.first().cloned();
        tracing::debug!(failures = failures.len(), "validation finished");
        Ok(failures)
    }

    /// Validate according to the configured [`EvaluationMode`]
    pub fn run(&mut self) -> Result<Vec<Failure>, RuleError> {
        match self.config.mode() {
            EvaluationMode::FirstFailure => {
                Ok(self.validate()?.failure().cloned().into_iter().collect())
            }
            EvaluationMode::CollectAll => self.validate_all(),
        }
    }

    /// Validate and report the outcome through callbacks
    ///
    /// Exactly one callback runs, on the calling thread, before this returns.
    /// Neither runs if a configuration error is returned.
    pub fn validate_with<S, F>(&mut self, on_success: S, on_failure: F) -> Result<(), RuleError>
    where
        S: FnOnce(&Validator),
        F: FnOnce(&Validator, &Failure),
    {
        match self.validate()? {
            Outcome::Valid => on_success(self),
            Outcome::Invalid(failure) => on_failure(self, &failure),
        }
        Ok(())
    }
}
