//! CLI argument parsing for lint-diffs.
//!
//! Uses clap derive macros for declarative argument definitions. Every
//! flag that maps to a configuration key is turned into an [`Override`]
//! and applied after the configuration files are layered.

use crate::config::{MAIN_SECTION, Override};
use clap::Parser;
use std::path::PathBuf;

/// Use a unified diff from stdin to guide linting.
///
/// Runs the configured linters on the changed files, but only reports
/// findings on lines the diff touched, plus any finding whose code matches
/// the linter's `always_report` pattern.
///
/// Usage: git diff -U0 | lint-diffs
#[derive(Parser, Debug)]
#[command(name = "lint-diffs")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Configuration is read from built-in defaults, ~/.config/lint-diffs, \
                        .lint_diffs and .lint-diffs, later files winning per key.")]
pub struct Cli {
    /// Debug regex parsing and lint-diffs configuration.
    #[arg(long)]
    pub debug: bool,

    /// Number of linters to run in parallel.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub parallel: Option<u32>,

    /// Fail when a linter's command cannot be found.
    #[arg(long)]
    pub strict: bool,

    /// Location of the user config file (default: ~/.config/lint-diffs).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a configuration key, e.g. pylint:always_report=W0613 (repeatable).
    #[arg(short = 'o', long = "option", value_name = "NAME:KEY=VALUE", value_parser = parse_override)]
    pub options: Vec<Override>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Configuration overrides implied by the arguments, in application
    /// order: flags first, then `-o` options as given.
    pub fn overrides(&self) -> Vec<Override> {
        let mut overrides = Vec::new();

        if self.debug {
            overrides.push(Override::new(MAIN_SECTION, "debug", "true"));
        }
        if self.strict {
            overrides.push(Override::new(MAIN_SECTION, "strict", "true"));
        }
        if let Some(parallel) = self.parallel {
            overrides.push(Override::new(MAIN_SECTION, "parallel", parallel.to_string()));
        }

        overrides.extend(self.options.iter().cloned());
        overrides
    }
}

fn parse_override(s: &str) -> Result<Override, String> {
    s.parse::<Override>().map_err(|e| e.to_string())
}
