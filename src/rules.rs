#![forbid(unsafe_code)]

//! Rule definitions, the pattern table and the rule registry

mod builtin;
mod patterns;
mod regex_rule;
mod registry;
mod rule;

// Re-export core types
pub use builtin::{MaxLength, MinLength, PatternMatch, Required, builtin_rules};
pub use patterns::PatternTable;
pub use regex_rule::{RegexRule, RegexRuleDefinition};
pub use registry::RuleRegistry;
pub use rule::{FnRule, Predicate, Rule, RuleInput};
