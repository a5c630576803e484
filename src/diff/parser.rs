//! Core diff parsing logic.

use crate::error::{LintDiffsError, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::helpers::{parse_diff_git_line, parse_hunk_header, parse_target_path};

/// Position inside a hunk body.
struct HunkCursor {
    next_line: usize,
    old_remaining: usize,
    new_remaining: usize,
}

impl HunkCursor {
    fn is_done(&self) -> bool {
        self.old_remaining == 0 && self.new_remaining == 0
    }
}

/// Parse target-side line numbers from raw unified diff text.
///
/// Collects added lines and context lines of every hunk, bounded by the
/// hunk header's lengths so trailing text is never attributed to a hunk.
/// Deleted files are left out; files without hunks map to an empty set.
/// A hunk header that cannot be parsed drops its file from the result.
pub fn parse_target_lines(diff_output: &str) -> Result<BTreeMap<String, BTreeSet<usize>>> {
    let mut result: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
    let mut current_file: Option<String> = None;
    // File named by the latest `diff --git` header, until its `---` line
    let mut git_file: Option<String> = None;
    let mut hunk: Option<HunkCursor> = None;
    let mut saw_header = false;

    for line in diff_output.lines() {
        if let Some(cursor) = hunk.as_mut() {
            if consume_hunk_line(line, cursor, current_file.as_deref(), &mut result) {
                if cursor.is_done() {
                    hunk = None;
                }
                continue;
            }
            // Anything else ends a truncated hunk
            hunk = None;
        }

        // Format: "diff --git a/path/to/file b/path/to/file"
        if let Some(rest) = line.strip_prefix("diff --git ") {
            saw_header = true;
            current_file = parse_diff_git_line(rest);
            if let Some(file) = &current_file {
                result.entry(file.clone()).or_default();
            }
            git_file = current_file.clone();
            continue;
        }

        // A new file entry; only a git header can have named it already
        if line.starts_with("--- ") {
            saw_header = true;
            current_file = git_file.take();
            continue;
        }

        // Format: "+++ b/path/to/file" or "+++ /dev/null"
        if let Some(rest) = line.strip_prefix("+++ ") {
            saw_header = true;
            match parse_target_path(rest) {
                Some(path) => {
                    result.entry(path.clone()).or_default();
                    current_file = Some(path);
                }
                None => {
                    if let Some(file) = current_file.take() {
                        result.remove(&file);
                    }
                }
            }
            continue;
        }

        if line.starts_with("deleted file mode") {
            git_file = None;
            if let Some(file) = current_file.take() {
                result.remove(&file);
            }
            continue;
        }

        if line.starts_with("@@ ") {
            let Some(file) = &current_file else {
                continue;
            };
            match parse_hunk_header(line) {
                Some(header) => {
                    let cursor = HunkCursor {
                        next_line: header.new_start,
                        old_remaining: header.old_len,
                        new_remaining: header.new_len,
                    };
                    if !cursor.is_done() {
                        hunk = Some(cursor);
                    }
                }
                None => {
                    debug!("dropping {} after malformed hunk header: {}", file, line);
                    result.remove(file);
                    current_file = None;
                }
            }
        }
    }

    if !saw_header && !diff_output.trim().is_empty() {
        return Err(LintDiffsError::DiffParseError(
            "input contains no diff file headers".to_string(),
        ));
    }

    Ok(result)
}

/// Apply one hunk body line to the cursor. Returns false if the line does
/// not belong to the hunk.
fn consume_hunk_line(
    line: &str,
    cursor: &mut HunkCursor,
    file: Option<&str>,
    result: &mut BTreeMap<String, BTreeSet<usize>>,
) -> bool {
    let mut record = |line_no: usize| {
        if let Some(file) = file {
            result.entry(file.to_string()).or_default().insert(line_no);
        }
    };

    if line.starts_with('\\') {
        // "\ No newline at end of file"
        return true;
    }

    if line.starts_with('+') && cursor.new_remaining > 0 {
        record(cursor.next_line);
        cursor.next_line += 1;
        cursor.new_remaining -= 1;
        return true;
    }

    if line.starts_with('-') && cursor.old_remaining > 0 {
        cursor.old_remaining -= 1;
        return true;
    }

    // Some tools strip the leading space from empty context lines
    if (line.starts_with(' ') || line.is_empty())
        && cursor.old_remaining > 0
        && cursor.new_remaining > 0
    {
        record(cursor.next_line);
        cursor.next_line += 1;
        cursor.old_remaining -= 1;
        cursor.new_remaining -= 1;
        return true;
    }

    false
}
