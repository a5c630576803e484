//! Public API for the diff index.

use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};

use super::parser::parse_target_lines;

/// Target-side line numbers touched by a unified diff, per file.
///
/// Built once per run and read-only afterwards. Paths use forward slashes
/// and carry no `a/`/`b/` prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffIndex {
    files: BTreeMap<String, BTreeSet<usize>>,
}

impl DiffIndex {
    /// Parse unified diff text into an index.
    ///
    /// # Returns
    ///
    /// * `Ok(DiffIndex)` - Index of target lines (empty for blank input)
    /// * `Err(LintDiffsError::DiffParseError)` - Input contains no diff file headers
    pub fn parse(diff_text: &str) -> Result<Self> {
        Ok(Self {
            files: parse_target_lines(diff_text)?,
        })
    }

    /// Target line numbers recorded for a file, if the diff mentions it.
    #[cfg(test)]
    pub fn lines(&self, file: &str) -> Option<&BTreeSet<usize>> {
        self.files.get(file)
    }

    /// Whether the given target line of a file is part of the diff.
    pub fn contains(&self, file: &str, line: usize) -> bool {
        self.files.get(file).is_some_and(|lines| lines.contains(&line))
    }

    /// Paths of all files present in the target version of the diff.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, BTreeSet<usize>)> for DiffIndex {
    fn from_iter<T: IntoIterator<Item = (String, BTreeSet<usize>)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
