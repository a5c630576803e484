//! Unified diff parsing for lint-diffs.
//!
//! Turns `git diff -U0`-style text read from stdin into a [`DiffIndex`]:
//! for every file in the target version, the set of line numbers that a
//! lint finding must hit to count as "mine".
//!
//! The parsing is deterministic and supports:
//! - Git headers (`diff --git a/... b/...`) and plain `diff -u` headers
//! - Any context width (context lines are part of the target side)
//! - New files (from /dev/null) and deleted files (to /dev/null)
//! - Multiple hunks per file, unioned
//! - Renames and mode-only changes (file present, no lines)

mod api;
mod helpers;
mod parser;


// Re-export public API
pub use api::DiffIndex;
pub use helpers::normalize_path;
