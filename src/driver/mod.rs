//! Run orchestration.
//!
//! A run moves through these stages:
//!
//! ```text
//! Init -> DiffLoaded -> RulesResolved -> NoWork
//!                                     -> Running -> Aggregated
//! ```
//!
//! The diff is indexed, changed files are resolved to rules, and each
//! `(rule, files)` pair is linted and classified, sequentially or on a
//! rayon pool of `parallel` threads. Every rule's block of output is
//! written while holding the console lock, so blocks never interleave.
//! The exit status is the maximum of the per-rule statuses.

#[cfg(test)]
mod tests;

use crate::classify::{LintResult, classify_output};
use crate::config::Config;
use crate::diff::DiffIndex;
use crate::error::Result;
use crate::exit_codes;
use crate::registry::{self, Assignment, Resolution};
use crate::runner::{self, CommandRunner, Invocation};
use rayon::prelude::*;
use std::io::Write;
use std::sync::Mutex;
use tracing::{debug, error, warn};

/// Execute a full run over diff text, writing rule blocks to `out`.
///
/// Returns the process exit status (0 when nothing needed linting or no
/// rule surfaced findings).
pub fn run<W: Write + Send>(
    config: &Config,
    runner: &dyn CommandRunner,
    diff_text: &str,
    out: W,
) -> i32 {
    let diffs = load_diff(diff_text);
    debug!("diff touches {} files: {:?}", diffs.len(), diffs.files().collect::<Vec<_>>());

    let assignments = match registry::resolve(config, diffs.files()) {
        Resolution::NothingToDo => {
            debug!("no files need linting");
            return exit_codes::SUCCESS;
        }
        Resolution::Assigned(assignments) => assignments,
    };

    for assignment in &assignments {
        debug!("linter {}: {:?}", assignment.rule.name, assignment.files);
    }

    let settings = config.settings();
    let console = Mutex::new(out);
    let lint = |assignment: &Assignment<'_>| {
        let outcome = lint_rule(assignment, &diffs, runner, settings.debug);
        print_block(&console, &assignment.rule.name, &outcome);
        match outcome {
            Ok(result) => result.exit_status(settings.strict),
            Err(_) => exit_codes::FAILURE,
        }
    };

    let statuses: Vec<i32> = if settings.parallel > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(settings.parallel)
            .build()
        {
            Ok(pool) => pool.install(|| assignments.par_iter().map(&lint).collect()),
            Err(e) => {
                warn!("failed to start {} worker threads, running sequentially: {}", settings.parallel, e);
                assignments.iter().map(&lint).collect()
            }
        }
    } else {
        assignments.iter().map(&lint).collect()
    };

    statuses.into_iter().max().unwrap_or(exit_codes::SUCCESS)
}

/// Index the diff; input that is not a diff at all indexes nothing.
fn load_diff(diff_text: &str) -> DiffIndex {
    DiffIndex::parse(diff_text).unwrap_or_else(|e| {
        warn!("{}; no lines will be treated as changed", e);
        DiffIndex::default()
    })
}

/// Run one rule on its files and classify the output.
fn lint_rule(
    assignment: &Assignment<'_>,
    diffs: &DiffIndex,
    runner: &dyn CommandRunner,
    debug: bool,
) -> Result<LintResult> {
    let rule = assignment.rule;
    let result = match runner::invoke(rule, &assignment.files, runner)? {
        Invocation::Completed(process) => {
            debug!("{}: exit status {}", rule.name, process.returncode);
            classify_output(diffs, &process, &rule.pattern, debug)
        }
        Invocation::CommandNotFound { program } => {
            warn!("{}: command not found: {}", rule.name, program);
            LintResult::command_not_found(&rule.name, &program)
        }
    };

    debug!(
        "{}: total={} skipped={} mine={} always={} other={}",
        rule.name, result.total, result.skipped, result.mine, result.always, result.other
    );
    Ok(result)
}

fn print_block<W: Write>(console: &Mutex<W>, rule: &str, outcome: &Result<LintResult>) {
    let mut out = console.lock().unwrap_or_else(|poison| poison.into_inner());

    let written = match outcome {
        Ok(result) => writeln!(
            out,
            "{}=== {}: mine={}, always={}\n",
            result.output, rule, result.mine, result.always
        ),
        Err(e) => {
            error!("{}: {}", rule, e);
            writeln!(out, "=== {}: error: {}\n", rule, e)
        }
    };

    if let Err(e) = written.and_then(|()| out.flush()) {
        warn!("failed to write output for {}: {}", rule, e);
    }
}
