//! Linter output classification.
//!
//! Each line of a linter's output is matched against the rule's output
//! regex. Matched findings are then classified, in this order:
//!
//! 1. `always` if the rule has an always-report pattern matching the code
//! 2. `mine` if the finding's line was changed by the diff
//! 3. `other` otherwise
//!
//! Only `mine` and `always` lines are surfaced. Unmatched lines are counted
//! as skipped and shown (prefixed with `# `) in debug mode only.

mod record;
mod result;


use crate::config::OutputPattern;
use crate::diff::DiffIndex;
use crate::runner::ProcessOutput;

// Re-export public API
pub use record::MatchRecord;
pub use result::{Classification, LintResult};

/// Classify a single output line; `None` if it does not match the regex.
pub fn classify_line(diffs: &DiffIndex, pattern: &OutputPattern, line: &str) -> Option<Classification> {
    MatchRecord::parse(pattern, line).map(|record| record.classify(diffs, pattern))
}

/// Classify a finished linter's output against the diff.
///
/// With `debug`, unmatched lines are passed through prefixed with `# `.
pub fn classify_output(
    diffs: &DiffIndex,
    process: &ProcessOutput,
    pattern: &OutputPattern,
    debug: bool,
) -> LintResult {
    let mut result = LintResult {
        returncode: process.returncode,
        ..LintResult::default()
    };

    for line in process.output.lines() {
        result.total += 1;
        match classify_line(diffs, pattern, line) {
            Some(classification) => result.record(classification, line),
            None => {
                result.skipped += 1;
                if debug {
                    result.push_line(&format!("# {}", line));
                }
            }
        }
    }

    result
}
