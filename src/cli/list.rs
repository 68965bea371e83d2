//! Listing commands
//!
//! `fieldrules rules` shows every rule a configuration can name, with its
//! message template and configured parameter. `fieldrules patterns` shows the
//! named patterns available to `match`.

use crate::cli::args::OutputFormat;
use crate::cli::common::{self, EXIT_SUCCESS};
use crate::config::Config;
use crate::engine::MessageTable;
use crate::error::FieldrulesError;
use crate::output::{
    ListingHumanFormatter, ListingJsonlFormatter, PatternListing, RuleListing, RuleSource,
};
use crate::rules::{PatternTable, RuleRegistry};
use std::path::Path;

/// Run the rules listing
///
/// Exit code 0 on success, 2 or 3 if the configuration cannot be loaded.
pub fn run_rules(config: Option<&Path>, format: Option<OutputFormat>) -> i32 {
    match run_rules_inner(config, format) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => common::report_error(&e),
    }
}

/// Run the patterns listing
///
/// Exit code 0 on success, 2 or 3 if the configuration cannot be loaded.
pub fn run_patterns(config: Option<&Path>, format: Option<OutputFormat>) -> i32 {
    match run_patterns_inner(config, format) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => common::report_error(&e),
    }
}

fn run_rules_inner(path: Option<&Path>, format: Option<OutputFormat>) -> Result<(), FieldrulesError> {
    let config = common::load_optional_config(path)?;
    let listings = rule_listings(config.as_ref())?;

    let output = match common::resolve_format(format, config.as_ref()) {
        OutputFormat::Human => ListingHumanFormatter::new().format_rules(&listings),
        OutputFormat::Jsonl => ListingJsonlFormatter::new().format_rules(&listings),
    };
    print!("{}", output);
    Ok(())
}

fn run_patterns_inner(
    path: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<(), FieldrulesError> {
    let config = common::load_optional_config(path)?;
    let listings = pattern_listings(config.as_ref())?;

    let output = match common::resolve_format(format, config.as_ref()) {
        OutputFormat::Human => ListingHumanFormatter::new().format_patterns(&listings),
        OutputFormat::Jsonl => ListingJsonlFormatter::new().format_patterns(&listings),
    };
    print!("{}", output);
    Ok(())
}

/// Every available rule, sorted by name
pub(crate) fn rule_listings(config: Option<&Config>) -> Result<Vec<RuleListing>, FieldrulesError> {
    let (registry, messages) = match config {
        Some(config) => (
            config.registry()?,
            MessageTable::defaults().with_overrides(config.messages.iter()),
        ),
        None => (RuleRegistry::with_builtins(), MessageTable::defaults().clone()),
    };

    let listings = registry
        .iter_rules()
        .map(|rule| {
            let name = rule.name().as_str();
            let custom = config.is_some_and(|c| c.custom.contains_key(name));
            RuleListing {
                name: name.to_string(),
                description: rule.description().to_string(),
                source: if custom {
                    RuleSource::Custom
                } else {
                    RuleSource::Builtin
                },
                template: messages.resolve(name).to_string(),
                param: config.and_then(|c| c.rules.get(name).cloned()),
            }
        })
        .collect();

    Ok(listings)
}

/// Built-in patterns plus any the configuration adds, sorted by name
pub(crate) fn pattern_listings(
    config: Option<&Config>,
) -> Result<Vec<PatternListing>, FieldrulesError> {
    let table = match config {
        Some(config) => config.pattern_table()?,
        None => PatternTable::builtin(),
    };

    Ok(table
        .iter()
        .map(|(name, regex)| PatternListing {
            name: name.to_string(),
            regex: regex.as_str().to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleParam;

    const CONFIG: &str = r#"
[fieldrules]
version = "1"

[rules]
required = true
min = 8
password = true

[messages]
min = "at least %rule%"

[patterns]
ZIP = "^[0-9]{5}$"

[custom.password]
description = "Demo password"
pattern = "^12345qwerty$"
"#;

    #[test]
    fn test_rule_listings_without_config() {
        let listings = rule_listings(None).unwrap();
        let names: Vec<&str> = listings.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["match", "max", "min", "required"]);
        assert!(listings.iter().all(|l| l.source == RuleSource::Builtin));
        assert!(listings.iter().all(|l| l.param.is_none()));
    }

    #[test]
    fn test_rule_listings_with_config() {
        let config = Config::parse(CONFIG).unwrap();
        let listings = rule_listings(Some(&config)).unwrap();

        let min = listings.iter().find(|l| l.name == "min").unwrap();
        assert_eq!(min.template, "at least %rule%");
        assert_eq!(min.param, Some(RuleParam::Integer(8)));

        let password = listings.iter().find(|l| l.name == "password").unwrap();
        assert_eq!(password.source, RuleSource::Custom);
        assert_eq!(password.description, "Demo password");
        assert_eq!(password.template, "password");

        let matcher = listings.iter().find(|l| l.name == "match").unwrap();
        assert_eq!(matcher.param, None);
    }

    #[test]
    fn test_pattern_listings_include_extras() {
        let config = Config::parse(CONFIG).unwrap();
        let listings = pattern_listings(Some(&config)).unwrap();
        let zip = listings.iter().find(|l| l.name == "ZIP").unwrap();
        assert_eq!(zip.regex, "^[0-9]{5}$");
        assert!(listings.iter().any(|l| l.name == "EMAIL"));
    }

    #[test]
    fn test_pattern_listings_builtin_only() {
        let listings = pattern_listings(None).unwrap();
        assert_eq!(listings.len(), PatternTable::builtin().len());
        assert!(listings.windows(2).all(|w| w[0].name < w[1].name));
    }
}
