//! Common helper functions shared across CLI commands
//!
//! Configuration discovery, format and color resolution, and the exit codes
//! every command shares.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::Config;
use crate::error::{ConfigError, FieldrulesError};
use std::io::IsTerminal;
use std::path::Path;

/// Exit codes shared by all commands
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "fieldrules.toml";

/// Load fieldrules.toml, which must exist
///
/// # Errors
///
/// Returns `ConfigError::Io` if the file does not exist or cannot be read,
/// `ConfigError::Parse` if it is not valid TOML and `ConfigError::Validation`
/// if it names unknown rules or patterns.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    if !config_path.exists() {
        return Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "{} not found. Run 'fieldrules init' to create it.",
                config_path.display()
            ),
        )));
    }

    tracing::debug!(path = %config_path.display(), "loading configuration");
    Config::load(config_path)
}

/// Load the configuration if one is available
///
/// An explicit path must exist; the default path is optional so listing
/// commands work without any configuration.
pub(crate) fn load_optional_config(path: Option<&Path>) -> Result<Option<Config>, ConfigError> {
    match path {
        Some(path) => load_config(Some(path)).map(Some),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(None).map(Some),
        None => Ok(None),
    }
}

/// Output format from the command line, then the config file, then human
pub(crate) fn resolve_format(cli: Option<OutputFormat>, config: Option<&Config>) -> OutputFormat {
    cli.or_else(|| config.map(|c| c.output.format.into()))
        .unwrap_or(OutputFormat::Human)
}

/// Color choice for stdout, resolving `auto` against the terminal
pub(crate) fn resolve_color(
    cli: Option<ColorChoice>,
    config: Option<&Config>,
) -> termcolor::ColorChoice {
    let choice = cli
        .or_else(|| config.map(|c| c.output.color.into()))
        .unwrap_or(ColorChoice::Auto);

    match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if std::io::stdout().is_terminal() => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    }
}

/// Report an error on stderr and map it to an exit code
///
/// Configuration files that are not valid TOML exit with
/// [`EXIT_PARSE_ERROR`]; everything else exits with [`EXIT_ERROR`].
pub(crate) fn report_error(e: &FieldrulesError) -> i32 {
    eprintln!("Error: {}", e);
    match e {
        FieldrulesError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
        _ => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorOption, OutputFormat as ConfigFormat};

    fn jsonl_config() -> Config {
        let mut config = Config::parse("[fieldrules]\nversion = \"1\"\n").unwrap();
        config.output.format = ConfigFormat::Jsonl;
        config.output.color = ColorOption::Always;
        config
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let result = load_config(Some(Path::new("/nonexistent/fieldrules.toml")));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().contains("fieldrules init"));
    }

    #[test]
    fn test_load_optional_config_explicit_path_must_exist() {
        let result = load_optional_config(Some(Path::new("/nonexistent/fieldrules.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[fieldrules]\nversion = \"1\"\n\n[rules]\nrequired = true\n")
            .unwrap();

        let config = load_optional_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn test_resolve_format_precedence() {
        let config = jsonl_config();
        assert_eq!(resolve_format(None, None), OutputFormat::Human);
        assert_eq!(resolve_format(None, Some(&config)), OutputFormat::Jsonl);
        assert_eq!(
            resolve_format(Some(OutputFormat::Human), Some(&config)),
            OutputFormat::Human
        );
    }

    #[test]
    fn test_resolve_color_precedence() {
        let config = jsonl_config();
        assert_eq!(
            resolve_color(None, Some(&config)),
            termcolor::ColorChoice::Always
        );
        assert_eq!(
            resolve_color(Some(ColorChoice::Never), Some(&config)),
            termcolor::ColorChoice::Never
        );
    }

    #[test]
    fn test_report_error_exit_codes() {
        let parse = toml::from_str::<Config>("not = [valid").unwrap_err();
        assert_eq!(
            report_error(&FieldrulesError::Config(ConfigError::Parse(parse))),
            EXIT_PARSE_ERROR
        );
        assert_eq!(
            report_error(&FieldrulesError::Config(ConfigError::Validation(
                "bad".to_string()
            ))),
            EXIT_ERROR
        );
    }
}
