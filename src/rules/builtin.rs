#![forbid(unsafe_code)]

//! Built-in rules: `required`, `min`, `max` and `match`
//!
//! Built-in rule objects are created once and shared by every registry.

use crate::error::RuleError;
use crate::rules::{PatternTable, Rule, RuleInput};
use crate::types::{RuleName, RuleParam};
use std::sync::{Arc, LazyLock};

static BUILTIN_RULES: LazyLock<Vec<Arc<dyn Rule>>> = LazyLock::new(|| {
    vec![
        Arc::new(Required::new()) as Arc<dyn Rule>,
        Arc::new(MinLength::new()),
        Arc::new(MaxLength::new()),
        Arc::new(PatternMatch::new()),
    ]
});

/// All built-in rules
pub fn builtin_rules() -> &'static [Arc<dyn Rule>] {
    &BUILTIN_RULES
}

fn builtin_name(name: &str) -> RuleName {
    RuleName::new(name).unwrap_or_else(|| unreachable!("built-in rule name '{}' is valid", name))
}

/// Number of characters in `value`
fn char_len(value: &str) -> f64 {
    value.chars().count() as f64
}

fn length_bound(rule: &RuleName, param: &RuleParam) -> Result<f64, RuleError> {
    match param.as_number() {
        Some(bound) if bound.is_finite() => Ok(bound),
        Some(bound) => Err(RuleError::InvalidParameter {
            rule: rule.to_string(),
            message: format!("expected a finite number, got {}", bound),
        }),
        None => Err(RuleError::InvalidParameter {
            rule: rule.to_string(),
            message: format!("expected a number, got {} '{}'", param.kind(), param),
        }),
    }
}

/// `required`: the value is non-empty after trimming whitespace
///
/// The parameter is ignored.
#[derive(Debug)]
pub struct Required {
    name: RuleName,
}

impl Required {
    pub fn new() -> Self {
        Self {
            name: builtin_name("required"),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Required {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn description(&self) -> &str {
        "Value must contain non-whitespace characters"
    }

    fn test(&self, input: &RuleInput<'_>, _param: &RuleParam) -> Result<bool, RuleError> {
        Ok(!input.value.trim().is_empty())
    }
}

/// `min`: the value has at least `n` characters
#[derive(Debug)]
pub struct MinLength {
    name: RuleName,
}

impl MinLength {
    pub fn new() -> Self {
        Self {
            name: builtin_name("min"),
        }
    }
}

impl Default for MinLength {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MinLength {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn description(&self) -> &str {
        "Value must have at least N characters"
    }

    fn check_param(&self, param: &RuleParam, _patterns: &PatternTable) -> Result<(), RuleError> {
        length_bound(&self.name, param).map(|_| ())
    }

    fn test(&self, input: &RuleInput<'_>, param: &RuleParam) -> Result<bool, RuleError> {
        Ok(char_len(input.value) >= length_bound(&self.name, param)?)
    }
}

/// `max`: the value has at most `n` characters
#[derive(Debug)]
pub struct MaxLength {
    name: RuleName,
}

impl MaxLength {
    pub fn new() -> Self {
        Self {
            name: builtin_name("max"),
        }
    }
}

impl Default for MaxLength {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MaxLength {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn description(&self) -> &str {
        "Value must have at most N characters"
    }

    fn check_param(&self, param: &RuleParam, _patterns: &PatternTable) -> Result<(), RuleError> {
        length_bound(&self.name, param).map(|_| ())
    }

    fn test(&self, input: &RuleInput<'_>, param: &RuleParam) -> Result<bool, RuleError> {
        Ok(char_len(input.value) <= length_bound(&self.name, param)?)
    }
}

/// `match`: the value matches a named pattern from the pattern table
#[derive(Debug)]
pub struct PatternMatch {
    name: RuleName,
}

impl PatternMatch {
    pub fn new() -> Self {
        Self {
            name: builtin_name("match"),
        }
    }

    fn lookup<'p>(
        &self,
        param: &RuleParam,
        patterns: &'p PatternTable,
    ) -> Result<&'p regex::Regex, RuleError> {
        let pattern_name = param.as_text().ok_or_else(|| RuleError::InvalidParameter {
            rule: self.name.to_string(),
            message: format!("expected a pattern name, got {} '{}'", param.kind(), param),
        })?;

        patterns
            .get(pattern_name)
            .ok_or_else(|| RuleError::UnknownPattern {
                name: pattern_name.to_string(),
                available: patterns.joined_names(),
            })
    }
}

impl Default for PatternMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for PatternMatch {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn description(&self) -> &str {
        "Value must match the named pattern"
    }

    fn check_param(&self, param: &RuleParam, patterns: &PatternTable) -> Result<(), RuleError> {
        self.lookup(param, patterns).map(|_| ())
    }

    fn test(&self, input: &RuleInput<'_>, param: &RuleParam) -> Result<bool, RuleError> {
        Ok(self.lookup(param, input.patterns)?.is_match(input.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: &dyn Rule, value: &str, param: impl Into<RuleParam>) -> Result<bool, RuleError> {
        let patterns = PatternTable::builtin();
        let input = RuleInput {
            value,
            patterns: &patterns,
        };
        rule.test(&input, &param.into())
    }

    #[test]
    fn test_builtin_rule_names() {
        let names: Vec<&str> = builtin_rules().iter().map(|r| r.name().as_str()).collect();
        assert_eq!(names, vec!["required", "min", "max", "match"]);
    }

    #[test]
    fn test_required() {
        let rule = Required::new();
        assert!(!run(&rule, "", true).unwrap());
        assert!(!run(&rule, "   ", true).unwrap());
        assert!(!run(&rule, "\t\n", true).unwrap());
        assert!(run(&rule, "a", true).unwrap());
        assert!(run(&rule, "  a  ", true).unwrap());
    }

    #[test]
    fn test_min_length() {
        let rule = MinLength::new();
        assert!(run(&rule, "abcde", 5).unwrap());
        assert!(run(&rule, "abcdef", 5).unwrap());
        assert!(!run(&rule, "abcd", 5).unwrap());
        assert!(run(&rule, "", 0).unwrap());
        assert!(run(&rule, "", -1).unwrap());
    }

    #[test]
    fn test_max_length() {
        let rule = MaxLength::new();
        assert!(run(&rule, "ab", 2).unwrap());
        assert!(run(&rule, "", 2).unwrap());
        assert!(!run(&rule, "abc", 2).unwrap());
        assert!(!run(&rule, "a", -1).unwrap());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(run(&MaxLength::new(), "привет", 6).unwrap());
        assert!(run(&MinLength::new(), "привет", 6).unwrap());
    }

    #[test]
    fn test_length_bounds_are_monotonic() {
        let value = "hello";
        let min = MinLength::new();
        let max = MaxLength::new();
        for n in 0..10 {
            if !run(&min, value, n).unwrap() {
                assert!(!run(&min, value, n + 1).unwrap());
            }
            if run(&max, value, n).unwrap() {
                assert!(run(&max, value, n + 1).unwrap());
            }
            assert_eq!(run(&min, value, n).unwrap(), value.len() as i32 >= n);
            assert_eq!(run(&max, value, n).unwrap(), value.len() as i32 <= n);
        }
    }

    #[test]
    fn test_float_bounds() {
        assert!(!run(&MinLength::new(), "ab", 2.5).unwrap());
        assert!(run(&MaxLength::new(), "ab", 2.5).unwrap());
    }

    #[test]
    fn test_length_rejects_non_numeric_param() {
        let patterns = PatternTable::empty();
        let result = MinLength::new().check_param(&RuleParam::from("five"), &patterns);
        assert!(matches!(
            result,
            Err(RuleError::InvalidParameter { ref rule, .. }) if rule == "min"
        ));
        assert!(run(&MaxLength::new(), "ab", true).is_err());
    }

    #[test]
    fn test_length_rejects_non_finite_param() {
        let patterns = PatternTable::empty();
        for bound in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let param = RuleParam::from(bound);
            assert!(matches!(
                MinLength::new().check_param(&param, &patterns),
                Err(RuleError::InvalidParameter { .. })
            ));
            assert!(matches!(
                MaxLength::new().check_param(&param, &patterns),
                Err(RuleError::InvalidParameter { .. })
            ));
        }
        assert!(run(&MinLength::new(), "abc", f64::NAN).is_err());
    }

    #[test]
    fn test_match_email() {
        let rule = PatternMatch::new();
        assert!(run(&rule, "a@b.com", "EMAIL").unwrap());
        assert!(!run(&rule, "not-an-email", "EMAIL").unwrap());
    }

    #[test]
    fn test_match_unknown_pattern() {
        let rule = PatternMatch::new();
        match run(&rule, "a@b.com", "NOPE") {
            Err(RuleError::UnknownPattern { name, available }) => {
                assert_eq!(name, "NOPE");
                assert!(available.contains("EMAIL"));
            }
            other => panic!("Expected UnknownPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_match_pattern_names_are_case_sensitive() {
        let rule = PatternMatch::new();
        assert!(matches!(
            run(&rule, "a@b.com", "email"),
            Err(RuleError::UnknownPattern { .. })
        ));
    }

    #[test]
    fn test_match_check_param() {
        let rule = PatternMatch::new();
        let patterns = PatternTable::builtin();
        assert!(rule.check_param(&RuleParam::from("IPV4"), &patterns).is_ok());
        assert!(matches!(
            rule.check_param(&RuleParam::from(3), &patterns),
            Err(RuleError::InvalidParameter { .. })
        ));
        assert!(matches!(
            rule.check_param(&RuleParam::from("NOPE"), &patterns),
            Err(RuleError::UnknownPattern { .. })
        ));
    }
}
