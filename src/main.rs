//! Fieldrules CLI entry point

use clap::Parser;
use fieldrules::cli::check::{CheckOptions, run_check};
use fieldrules::cli::init::InitOutcome;
use fieldrules::cli::{Command, args::Cli, common};
use std::process;

fn main() {
    let cli = Cli::parse();
    fieldrules::logging::init_logging(cli.verbose);

    let exit_code = match cli.command {
        Command::Init { force } => match fieldrules::cli::init::run_init(force) {
            Ok(InitOutcome::Skipped(path)) => {
                eprintln!("{} already exists. Use --force to overwrite it.", path);
                common::EXIT_SUCCESS
            }
            Ok(InitOutcome::Created(_) | InitOutcome::Overwritten(_)) => {
                println!("Created fieldrules.toml. Edit [rules] to match your field.");
                common::EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                common::EXIT_ERROR
            }
        },
        Command::Check {
            values,
            config,
            stdin,
            all,
            format,
        } => run_check(&CheckOptions {
            values: &values,
            config: config.as_deref(),
            stdin,
            all,
            format,
            color: cli.color,
        }),
        Command::Patterns { config, format } => {
            fieldrules::cli::list::run_patterns(config.as_deref(), format)
        }
        Command::Rules { config, format } => {
            fieldrules::cli::list::run_rules(config.as_deref(), format)
        }
    };

    process::exit(exit_code);
}
