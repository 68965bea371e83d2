//! Configuration: the in-memory validator configuration and the
//! fieldrules.toml file format

pub mod fieldrules_toml;
pub mod validator_config;

pub use fieldrules_toml::{ColorOption, Config, FieldrulesMeta, OutputConfig, OutputFormat};
pub use validator_config::{ConfigBuilder, RuleSet, ValidatorConfig};
