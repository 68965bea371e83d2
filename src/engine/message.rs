#![forbid(unsafe_code)]

//! Failure message templates
//!
//! Templates contain `%key%` placeholders. The engine substitutes `%rule%`
//! with the rule's parameter and `%value%` with the value under validation.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Default English templates, keyed by built-in rule name
const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("required", "This field is required"),
    ("min", "This field should contain at least %rule% characters"),
    ("max", "This field should not contain more than %rule% characters"),
    ("match", "This field should contain a valid %rule%"),
];

static DEFAULTS: LazyLock<MessageTable> = LazyLock::new(|| MessageTable {
    templates: DEFAULT_TEMPLATES
        .iter()
        .map(|(rule, template)| (rule.to_string(), template.to_string()))
        .collect(),
});

/// Replace each `%key%` in `template` whose key appears in `substitutions`
///
/// The template is scanned once from left to right, so text coming from a
/// substitution is never expanded again. Placeholders with unknown keys are
/// kept verbatim.
pub fn format_message(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let replacement = after.find('%').and_then(|end| {
            let key = &after[..end];
            substitutions
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (end, *value))
        });

        match replacement {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Message templates keyed by rule name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    templates: HashMap<String, String>,
}

impl MessageTable {
    /// The default templates for the built-in rules
    pub fn defaults() -> &'static MessageTable {
        &DEFAULTS
    }

    /// Derive a table where `overrides` take precedence over this table
    pub fn with_overrides<'a, I, K>(&self, overrides: I) -> MessageTable
    where
        I: IntoIterator<Item = (K, &'a String)>,
        K: AsRef<str>,
    {
        let mut templates = self.templates.clone();
        for (rule, template) in overrides {
            templates.insert(rule.as_ref().to_string(), template.clone());
        }
        MessageTable { templates }
    }

    /// Template for `rule`, if one is defined
    pub fn get(&self, rule: &str) -> Option<&str> {
        self.templates.get(rule).map(String::as_str)
    }

    /// Template for `rule`, falling back to the rule name itself
    pub fn resolve<'a>(&'a self, rule: &'a str) -> &'a str {
        self.get(rule).unwrap_or(rule)
    }
}
