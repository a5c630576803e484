//! Lint command invocation.
//!
//! Builds a rule's argument vector and runs it through a
//! [`CommandRunner`]. A missing executable is not an error at this level:
//! it is reported as [`Invocation::CommandNotFound`] so the caller can
//! decide, based on strict mode, whether it fails the run.

mod command;
mod process;


use crate::config::LintRule;
use crate::error::{LintDiffsError, Result};
use std::collections::BTreeSet;
use tracing::debug;

// Re-export public API
pub use command::build_argv;
pub use process::{CommandRunner, ProcessOutput, SystemRunner};

/// How a rule's command invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The command ran to completion (any exit status).
    Completed(ProcessOutput),
    /// The command's executable could not be found.
    CommandNotFound { program: String },
}

/// Run a rule's command on its files.
///
/// # Returns
///
/// * `Ok(Invocation)` - The command completed, or could not be found
/// * `Err(LintDiffsError::CommandExecutionError)` - Any other failure
pub fn invoke(
    rule: &LintRule,
    files: &BTreeSet<String>,
    runner: &dyn CommandRunner,
) -> Result<Invocation> {
    debug!(
        "linter {}: {} {} {:?}",
        rule.name,
        rule.command,
        rule.pattern.source(),
        rule.pattern.always_source()
    );
    let argv = build_argv(&rule.command, files)?;
    debug!("{}: running {:?}", rule.name, argv);

    match runner.run(&argv) {
        Ok(output) => Ok(Invocation::Completed(output)),
        Err(LintDiffsError::CommandNotFound(program)) => {
            Ok(Invocation::CommandNotFound { program })
        }
        Err(e) => Err(e),
    }
}
