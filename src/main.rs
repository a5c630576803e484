//! lint-diffs: run linters, but only report findings on lines a diff touched.
//!
//! This is the main entry point for the `lint-diffs` CLI. It layers the
//! configuration, reads a unified diff from stdin, runs every linter whose
//! extensions match a changed file and prints the filtered findings.
//!
//! Usage: `git diff -U0 | lint-diffs`

mod classify;
mod cli;
mod config;
mod diff;
mod driver;
mod error;
mod exit_codes;
mod registry;
mod runner;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::{Config, ConfigBuilder};
use error::{LintDiffsError, Result};
use runner::SystemRunner;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `debug` in the configuration (or `--debug`) sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("lint_diffs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lint_diffs=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Layer configuration files and command-line overrides, start logging,
/// and freeze the result.
fn load_config(cli: &Cli) -> Result<Config> {
    let project_dir = std::env::current_dir().map_err(|e| {
        LintDiffsError::UserError(format!("failed to determine current directory: {}", e))
    })?;

    let mut builder = ConfigBuilder::with_defaults()?;
    builder.load_layers(cli.config.as_deref(), &project_dir)?;
    builder.apply_all(&cli.overrides());

    init_tracing(builder.debug_enabled());
    debug!("config files: {:?}", builder.sources());

    let config = builder.freeze();
    debug!(
        "{} active rules, {} sections skipped",
        config.rules().len(),
        config.rejected().len()
    );
    Ok(config)
}

fn run(cli: &Cli) -> Result<i32> {
    let config = load_config(cli)?;

    let diff_text = std::io::read_to_string(std::io::stdin()).map_err(|e| {
        LintDiffsError::UserError(format!("failed to read diff from stdin: {}", e))
    })?;

    Ok(driver::run(&config, &SystemRunner, &diff_text, std::io::stdout()))
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(code) => ExitCode::from(exit_codes::clamp(code)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(exit_codes::clamp(err.exit_code()))
        }
    }
}
