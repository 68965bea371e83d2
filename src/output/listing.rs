#![forbid(unsafe_code)]

//! Formatters for the `fieldrules rules` and `fieldrules patterns` listings

use crate::types::RuleParam;
use serde::Serialize;

/// Where a rule comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    Builtin,
    Custom,
}

impl RuleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSource::Builtin => "builtin",
            RuleSource::Custom => "custom",
        }
    }
}

/// Listing entry for a single rule
#[derive(Debug, Clone)]
pub struct RuleListing {
    pub name: String,
    pub description: String,
    pub source: RuleSource,
    /// Message template used when the rule fails
    pub template: String,
    /// Parameter from the loaded configuration, if the rule is configured
    pub param: Option<RuleParam>,
}

/// Listing entry for a single named pattern
#[derive(Debug, Clone)]
pub struct PatternListing {
    pub name: String,
    pub regex: String,
}

/// Human-readable formatter for listings
pub struct ListingHumanFormatter;

impl ListingHumanFormatter {
    /// Create a new human formatter
    pub fn new() -> Self {
        ListingHumanFormatter
    }

    /// Format a list of rules for human consumption
    pub fn format_rules(&self, rules: &[RuleListing]) -> String {
        let mut output = String::new();

        output.push_str(&format!("Rules ({} available):\n", rules.len()));
        output.push('\n');

        for rule in rules {
            output.push_str(&format!("{} ({})\n", rule.name, rule.source.as_str()));
            output.push_str(&format!("  Description: {}\n", rule.description));
            output.push_str(&format!("  Message: {}\n", rule.template));
            match &rule.param {
                Some(param) => output.push_str(&format!("  Configured: {}\n", param)),
                None => output.push_str("  Configured: no\n"),
            }
            output.push('\n');
        }

        output
    }

    /// Format a list of patterns for human consumption
    pub fn format_patterns(&self, patterns: &[PatternListing]) -> String {
        let mut output = String::new();

        output.push_str(&format!("Patterns ({} available):\n", patterns.len()));
        output.push('\n');

        let width = patterns.iter().map(|p| p.name.len()).max().unwrap_or(0);
        for pattern in patterns {
            output.push_str(&format!(
                "  {:width$}  {}\n",
                pattern.name,
                pattern.regex,
                width = width
            ));
        }

        output
    }
}

impl Default for ListingHumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// JSONL output structure for a rule
#[derive(Debug, Serialize)]
struct JsonlRule<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    source: &'static str,
    description: &'a str,
    template: &'a str,
    configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    param: Option<&'a RuleParam>,
}

/// JSONL output structure for a pattern
#[derive(Debug, Serialize)]
struct JsonlPattern<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    regex: &'a str,
}

/// JSONL formatter for listings
pub struct ListingJsonlFormatter;

impl ListingJsonlFormatter {
    /// Create a new JSONL formatter
    pub fn new() -> Self {
        ListingJsonlFormatter
    }

    /// One `rule` record per line
    pub fn format_rules(&self, rules: &[RuleListing]) -> String {
        let mut output = String::new();
        for rule in rules {
            let record = JsonlRule {
                record_type: "rule",
                name: &rule.name,
                source: rule.source.as_str(),
                description: &rule.description,
                template: &rule.template,
                configured: rule.param.is_some(),
                param: rule.param.as_ref(),
            };
            super::jsonl::push_record(&mut output, &record);
        }
        output
    }

    /// One `pattern` record per line
    pub fn format_patterns(&self, patterns: &[PatternListing]) -> String {
        let mut output = String::new();
        for pattern in patterns {
            let record = JsonlPattern {
                record_type: "pattern",
                name: &pattern.name,
                regex: &pattern.regex,
            };
            super::jsonl::push_record(&mut output, &record);
        }
        output
    }
}

impl Default for ListingJsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}
