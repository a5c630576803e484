//! Error types for the lint-diffs CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lint-diffs operations.
///
/// Invalid lint rules are not represented here: they are recorded as
/// [`crate::config::RuleRejection`] values and never abort a run.
#[derive(Error, Debug)]
pub enum LintDiffsError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// A configuration file could not be read or is not valid INI text.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// The diff input is not unified diff text at all.
    #[error("failed to parse diff: {0}")]
    DiffParseError(String),

    /// The lint command's executable could not be located.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// Spawning or reading from the lint command failed.
    #[error("command execution failed: {0}")]
    CommandExecutionError(String),
}

impl LintDiffsError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LintDiffsError::UserError(_) => exit_codes::USER_ERROR,
            LintDiffsError::ConfigError(_) => exit_codes::USER_ERROR,
            LintDiffsError::DiffParseError(_) => exit_codes::FAILURE,
            LintDiffsError::CommandNotFound(_) => exit_codes::FAILURE,
            LintDiffsError::CommandExecutionError(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for lint-diffs operations.
pub type Result<T> = std::result::Result<T, LintDiffsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = LintDiffsError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = LintDiffsError::ConfigError("line 3: missing section".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn execution_errors_fail_the_run() {
        let err = LintDiffsError::CommandExecutionError("permission denied".to_string());
        assert_eq!(err.exit_code(), exit_codes::FAILURE);

        let err = LintDiffsError::CommandNotFound("pylint".to_string());
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = LintDiffsError::CommandNotFound("no-such-command".to_string());
        assert_eq!(err.to_string(), "command not found: no-such-command");

        let err = LintDiffsError::DiffParseError("no file headers".to_string());
        assert_eq!(err.to_string(), "failed to parse diff: no file headers");
    }
}
