#![forbid(unsafe_code)]

//! Parallel validation of many values against one configuration
//!
//! Every value gets its own [`Validator`]; the rule registry and pattern table
//! are shared read-only between worker threads.

use crate::config::ValidatorConfig;
use crate::engine::validator::{Failure, Validator};
use crate::error::RuleError;
use crate::rules::{PatternTable, RuleRegistry};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Validation result for one value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    /// The value that was validated
    pub value: String,
    /// Failures in rule order; empty when the value is valid
    pub failures: Vec<Failure>,
}

impl BatchResult {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validates many values in parallel using rayon
pub struct BatchValidator {
    config: ValidatorConfig,
    registry: RuleRegistry,
    patterns: Arc<PatternTable>,
}

impl BatchValidator {
    /// Creates a new BatchValidator
    ///
    /// # Arguments
    ///
    /// * `config` - Rules, message overrides and evaluation mode
    /// * `registry` - Rules available to every validator
    /// * `patterns` - Pattern table for `match`
    pub fn new(config: ValidatorConfig, registry: RuleRegistry, patterns: Arc<PatternTable>) -> Self {
        Self {
            config,
            registry,
            patterns,
        }
    }

    /// Validator for a single value sharing this batch's rules and patterns
    pub fn validator(&self, value: impl Into<String>) -> Validator {
        Validator::new(value, self.config.clone())
            .with_registry(self.registry.clone())
            .with_patterns(Arc::clone(&self.patterns))
    }

    /// Validate every value
    ///
    /// Results are returned in input order.
    ///
    /// # Errors
    ///
    /// Returns the configuration error if any configured rule is unknown or
    /// misconfigured; no partial results are returned in that case.
    pub fn run(&self, values: Vec<String>) -> Result<Vec<BatchResult>, RuleError> {
        tracing::debug!(
            values = values.len(),
            rules = self.config.rules().len(),
            "starting batch validation"
        );

        values
            .into_par_iter()
            .map(|value| -> Result<BatchResult, RuleError> {
                let mut validator = self.validator(value);
                let failures = validator.run()?;
                Ok(BatchResult {
                    value: validator.value().to_string(),
                    failures,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EvaluationMode;

    fn email_batch(mode: EvaluationMode) -> BatchValidator {
        let config = ValidatorConfig::builder()
            .rule("required", true)
            .rule("min", 5)
            .rule("max", 20)
            .rule("match", "EMAIL")
            .mode(mode)
            .build()
            .unwrap();
        BatchValidator::new(config, RuleRegistry::with_builtins(), PatternTable::builtin())
    }

    #[test]
    fn test_run_preserves_input_order() {
        let batch = email_batch(EvaluationMode::FirstFailure);
        let values: Vec<String> = (0..200)
            .map(|i| {
                if i % 2 == 0 {
                    format!("user{}@example.com", i)
                } else {
                    format!("bad{}", i)
                }
            })
            .collect();

        let results = batch.run(values.clone()).unwrap();
        assert_eq!(results.len(), values.len());
        for (i, (result, value)) in results.iter().zip(&values).enumerate() {
            assert_eq!(&result.value, value);
            assert_eq!(result.is_valid(), i % 2 == 0, "value {}", value);
        }
    }

    #[test]
    fn test_run_first_failure_mode() {
        let batch = email_batch(EvaluationMode::FirstFailure);
        let results = batch.run(vec![String::new()]).unwrap();
        assert_eq!(results[0].failures.len(), 1);
        assert_eq!(results[0].failures[0].rule.as_str(), "required");
    }

    #[test]
    fn test_run_collect_all_mode() {
        let batch = email_batch(EvaluationMode::CollectAll);
        let results = batch.run(vec![String::new()]).unwrap();
        let rules: Vec<&str> = results[0].failures.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["required", "min", "match"]);
    }

    #[test]
    fn test_run_surfaces_configuration_errors() {
        let config = ValidatorConfig::builder().rule("fooBar", true).build().unwrap();
        let batch =
            BatchValidator::new(config, RuleRegistry::with_builtins(), PatternTable::builtin());
        let result = batch.run(vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(result, Err(RuleError::UnknownRule(_))));
    }

    #[test]
    fn test_run_uses_shared_custom_rules() {
        let config = ValidatorConfig::builder().rule("even", true).build().unwrap();
        let mut registry = RuleRegistry::with_builtins();
        registry
            .add_rule("even", |_, value| value.chars().count() % 2 == 0)
            .unwrap();
        let batch = BatchValidator::new(config, registry, PatternTable::builtin());

        let results = batch
            .run(vec!["ab".to_string(), "abc".to_string()])
            .unwrap();
        assert!(results[0].is_valid());
        assert!(!results[1].is_valid());
    }

    #[test]
    fn test_run_empty_input() {
        let batch = email_batch(EvaluationMode::FirstFailure);
        assert!(batch.run(Vec::new()).unwrap().is_empty());
    }
}
