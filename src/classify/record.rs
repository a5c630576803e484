//! Structured findings extracted from linter output lines.

use super::result::Classification;
use crate::config::OutputPattern;
use crate::diff::{DiffIndex, normalize_path};
use tracing::debug;

/// The `file`, `line` and `err` fields of one matched output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord<'a> {
    /// Normalized path (forward slashes, no leading `./`).
    pub file: String,
    /// `None` when the captured line number is not an integer.
    pub line: Option<usize>,
    pub err: &'a str,
}

impl<'a> MatchRecord<'a> {
    /// Extract a record from an output line; `None` if the regex does not
    /// match. Groups that do not participate in the match read as empty.
    pub fn parse(pattern: &OutputPattern, text: &'a str) -> Option<Self> {
        let caps = pattern.regex().captures(text)?;
        let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());

        let line = match group("line").trim().parse::<usize>() {
            Ok(line) => Some(line),
            Err(_) => {
                debug!("line number parse issue: {}", text);
                None
            }
        };

        Some(Self {
            file: normalize_path(group("file")),
            line,
            err: group("err"),
        })
    }

    /// Always-report first, then diff membership.
    pub fn classify(&self, diffs: &DiffIndex, pattern: &OutputPattern) -> Classification {
        if pattern
            .always_report()
            .is_some_and(|always| always.is_match(self.err))
        {
            return Classification::Always;
        }

        match self.line {
            Some(line) if diffs.contains(&self.file, line) => Classification::Mine,
            _ => Classification::Other,
        }
    }
}
