//! Per-rule lint results.

use crate::exit_codes;

/// How a matched output line was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The finding lies on a line changed by the diff.
    Mine,
    /// The finding's code matches the rule's always-report pattern.
    Always,
    /// The finding lies elsewhere and is suppressed.
    Other,
}

/// Summary of one rule invocation.
///
/// `total` counts every output line; each is exactly one of `skipped`,
/// `mine`, `always` or `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintResult {
    pub returncode: i32,
    /// Output lines that did not match the rule's regex.
    pub skipped: usize,
    pub total: usize,
    pub mine: usize,
    pub always: usize,
    pub other: usize,
    /// Surfaced output lines, newline-terminated.
    pub output: String,
    /// The rule's command could not be found.
    pub command_missing: bool,
}

impl LintResult {
    /// Sentinel result for a command whose executable does not exist.
    pub fn command_not_found(rule: &str, program: &str) -> Self {
        Self {
            returncode: exit_codes::COMMAND_NOT_FOUND,
            output: format!("{}: command not found: {}\n", rule, program),
            command_missing: true,
            ..Self::default()
        }
    }

    /// Findings surfaced to the user.
    pub fn linted(&self) -> usize {
        self.mine + self.always
    }

    pub(super) fn record(&mut self, classification: Classification, line: &str) {
        match classification {
            Classification::Mine => self.mine += 1,
            Classification::Always => self.always += 1,
            Classification::Other => {
                self.other += 1;
                return;
            }
        }
        self.push_line(line);
    }

    pub(super) fn push_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    /// This rule's contribution to the process exit status.
    ///
    /// A missing command counts as a failure only in strict mode. Otherwise
    /// a rule fails when it surfaced findings, with the tool's own exit
    /// status if non-zero.
    pub fn exit_status(&self, strict: bool) -> i32 {
        if self.command_missing {
            return if strict { exit_codes::FAILURE } else { exit_codes::SUCCESS };
        }

        if self.linted() == 0 {
            exit_codes::SUCCESS
        } else if self.returncode != 0 {
            self.returncode
        } else {
            exit_codes::FAILURE
        }
    }
}
