//! Parsing and validation for fieldrules.toml configuration files

use crate::config::validator_config::{RuleSet, ValidatorConfig};
use crate::engine::BatchValidator;
use crate::error::ConfigError;
use crate::rules::{PatternTable, RegexRule, RegexRuleDefinition, RuleRegistry};
use crate::types::{EvaluationMode, RuleName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Main configuration struct for fieldrules.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fieldrules metadata
    pub fieldrules: FieldrulesMeta,

    /// Rules to apply, in document order
    #[serde(default)]
    pub rules: RuleSet,

    /// Message template overrides keyed by rule name
    #[serde(default)]
    pub messages: HashMap<RuleName, String>,

    /// Extra named patterns for the `match` rule
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,

    /// Regex-backed custom rules
    #[serde(default)]
    pub custom: BTreeMap<RuleName, RegexRuleDefinition>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fieldrules.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.fieldrules.version
            )));
        }

        if let Some(name) = self.patterns.keys().find(|name| name.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Invalid pattern name '{}'",
                name
            )));
        }

        let patterns = self.pattern_table()?;
        let registry = self.registry()?;

        // A file cannot register closures, so every configured rule must
        // resolve against the built-in and custom rules.
        for (name, param) in self.rules.iter() {
            registry
                .resolve(name.as_str())
                .and_then(|rule| rule.check_param(param, &patterns))
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        Ok(())
    }

    /// The in-memory validator configuration described by this file
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig::new(self.rules.clone())
            .with_messages(self.messages.clone())
            .with_mode(self.fieldrules.mode)
    }

    /// Built-in patterns plus the `[patterns]` table
    ///
    /// Returns the shared built-in table unchanged when no extras are defined.
    pub fn pattern_table(&self) -> Result<Arc<PatternTable>, ConfigError> {
        let builtin = PatternTable::builtin();
        if self.patterns.is_empty() {
            return Ok(builtin);
        }
        builtin
            .extend(self.patterns.iter())
            .map(Arc::new)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Built-in rules plus the `[custom.*]` rules
    pub fn registry(&self) -> Result<RuleRegistry, ConfigError> {
        let mut registry = RuleRegistry::with_builtins();
        for (name, def) in &self.custom {
            let rule = RegexRule::from_definition(name.clone(), def)
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
            registry.register(Arc::new(rule));
        }
        Ok(registry)
    }

    /// A batch validator for this configuration
    pub fn batch_validator(&self) -> Result<BatchValidator, ConfigError> {
        Ok(BatchValidator::new(
            self.validator_config(),
            self.registry()?,
            self.pattern_table()?,
        ))
    }
}

/// Fieldrules metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldrulesMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// Report the first failure or every failure
    #[serde(default)]
    pub mode: EvaluationMode,
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}
