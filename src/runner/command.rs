//! Argument vector construction from a rule's command template.

use crate::config::FILES_PLACEHOLDER;
use crate::error::{LintDiffsError, Result};
use std::collections::BTreeSet;

/// Build the argument vector for running a command template on files.
///
/// The template is split with shell quoting rules. Every `$@` token
/// (written `"$@"` in configuration) is replaced by the files; without
/// one, the files are appended.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Program followed by its arguments
/// * `Err(LintDiffsError::CommandExecutionError)` - Unbalanced quotes or an empty template
pub fn build_argv(command: &str, files: &BTreeSet<String>) -> Result<Vec<String>> {
    let tokens = shell_words::split(command).map_err(|e| {
        LintDiffsError::CommandExecutionError(format!(
            "failed to parse command: {}\nCommand: {}\nFix: check for unmatched quotes or invalid escape sequences.",
            e, command
        ))
    })?;

    if tokens.is_empty() {
        return Err(LintDiffsError::CommandExecutionError(format!(
            "command is empty after parsing.\nCommand: {}",
            command
        )));
    }

    let mut argv = Vec::with_capacity(tokens.len() + files.len());
    let mut placeholder_found = false;
    for token in tokens {
        if token == FILES_PLACEHOLDER {
            argv.extend(files.iter().cloned());
            placeholder_found = true;
        } else {
            argv.push(token);
        }
    }

    if !placeholder_found {
        argv.extend(files.iter().cloned());
    }

    Ok(argv)
}
