//! Exit code constants for the lint-diffs CLI.
//!
//! - 0: No findings on changed lines
//! - 1: Findings on changed lines, or a rule could not be executed
//! - 2: User error (bad arguments, unreadable or malformed config file)
//!
//! A rule whose linter exited non-zero with findings on changed lines
//! contributes the linter's own exit code instead of 1.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Findings on changed lines, or a failed rule invocation.
pub const FAILURE: i32 = 1;

/// User error: bad arguments or configuration file problems.
pub const USER_ERROR: i32 = 2;

/// Return code recorded for a rule whose command could not be found.
///
/// Mirrors the shell's convention for "command not found".
pub const COMMAND_NOT_FOUND: i32 = 127;

/// Clamp an aggregated status into the range a process can exit with.
pub fn clamp(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(FAILURE as u8)
}
