//! Rule resolution: which lint rules apply to which changed files.
//!
//! A file's extension is the final `.`-suffix of its name, leading dot
//! included (`badcode.py` ⇒ `.py`), and is matched exactly and
//! case-sensitively against each rule's declared extensions.

use crate::config::{Config, LintRule};
use std::collections::BTreeSet;
use std::path::Path;

/// One rule and the changed files it must lint.
#[derive(Debug)]
pub struct Assignment<'c> {
    pub rule: &'c LintRule,
    pub files: BTreeSet<String>,
}

/// Outcome of resolving changed files against the configured rules.
#[derive(Debug)]
pub enum Resolution<'c> {
    /// No rule applies to any changed file.
    NothingToDo,
    /// Rules to run, in configuration order, each with at least one file.
    Assigned(Vec<Assignment<'c>>),
}

/// Extension of a path with its leading dot, if it has one.
pub fn file_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

/// Group changed files by the rules whose extensions they match.
pub fn resolve<'c, 'f>(config: &'c Config, files: impl IntoIterator<Item = &'f str>) -> Resolution<'c> {
    let mut assignments: Vec<Assignment<'c>> = config
        .rules()
        .iter()
        .map(|rule| Assignment {
            rule,
            files: BTreeSet::new(),
        })
        .collect();

    for file in files {
        let Some(ext) = file_extension(file) else {
            continue;
        };
        for assignment in assignments.iter_mut() {
            if assignment.rule.applies_to(&ext) {
                assignment.files.insert(file.to_string());
            }
        }
    }

    assignments.retain(|a| !a.files.is_empty());

    if assignments.is_empty() {
        Resolution::NothingToDo
    } else {
        Resolution::Assigned(assignments)
    }
}
