//! Check command implementation
//!
//! This module implements the `fieldrules check` command, which:
//! - Loads configuration from fieldrules.toml
//! - Collects values from the command line and optionally stdin
//! - Validates every value in parallel
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{self, EXIT_INVALID, EXIT_SUCCESS};
use crate::engine::{BatchResult, BatchValidator};
use crate::error::FieldrulesError;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::types::EvaluationMode;
use std::io::{self, BufRead, Write};
use std::path::Path;
use termcolor::StandardStream;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions<'a> {
    /// Values given on the command line
    pub values: &'a [String],
    /// Explicit configuration path
    pub config: Option<&'a Path>,
    /// Read further values from stdin, one per line
    pub stdin: bool,
    /// Report every failing rule
    pub all: bool,
    /// Output format override
    pub format: Option<OutputFormat>,
    /// Color override
    pub color: Option<ColorChoice>,
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: Success (every value is valid)
/// - 1: Invalid (one or more values failed a rule)
/// - 2: Error (configuration/I/O error)
/// - 3: Parse error (invalid TOML configuration)
pub fn run_check(options: &CheckOptions<'_>) -> i32 {
    match run_check_inner(options) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_INVALID,
        Err(e) => common::report_error(&e),
    }
}

/// Internal implementation of check command
fn run_check_inner(options: &CheckOptions<'_>) -> Result<bool, FieldrulesError> {
    // 1. Load fieldrules.toml
    let config = common::load_config(options.config)?;
    let format = common::resolve_format(options.format, Some(&config));

    // 2. Gather values
    let values = if options.stdin {
        collect_values(options.values, Some(io::stdin().lock()))?
    } else {
        collect_values(options.values, None::<io::Empty>)?
    };

    if values.is_empty() {
        eprintln!("Warning: No values given. Nothing to check.");
        return Ok(true);
    }

    // 3. Build the batch validator, with --all overriding the configured mode
    let mut validator_config = config.validator_config();
    if options.all {
        validator_config = validator_config.with_mode(EvaluationMode::CollectAll);
    }
    let batch = BatchValidator::new(
        validator_config,
        config.registry()?,
        config.pattern_table()?,
    );

    if format == OutputFormat::Human {
        eprintln!(
            "Checking {} value(s) with {} rule(s)...",
            values.len(),
            config.rules.len()
        );
    }

    // 4. Validate
    let results = batch.run(values)?;

    // 5. Format and print output
    match format {
        OutputFormat::Human => {
            let stream = StandardStream::stdout(common::resolve_color(options.color, Some(&config)));
            let mut out = stream.lock();
            HumanFormatter::new().write_results(&mut out, &results)?;
        }
        OutputFormat::Jsonl => {
            let mut out = io::stdout().lock();
            out.write_all(JsonlFormatter::new().format(&results).as_bytes())?;
        }
    }

    Ok(results.iter().all(BatchResult::is_valid))
}

/// Command-line values followed by one value per line of `reader`
fn collect_values<R: BufRead>(values: &[String], reader: Option<R>) -> io::Result<Vec<String>> {
    let mut collected = values.to_vec();
    if let Some(reader) = reader {
        for line in reader.lines() {
            collected.push(line?);
        }
    }
    tracing::debug!(values = collected.len(), "collected values");
    Ok(collected)
}
