//! Lint rule definitions and load-time validation.

use super::ini::Section;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

/// Capture groups every output regex must declare.
pub const REQUIRED_GROUPS: [&str; 3] = ["file", "line", "err"];

/// Token in a command template that expands to the rule's files.
pub const FILES_PLACEHOLDER: &str = "$@";

/// Compiled output-line pattern of a rule.
///
/// Both regexes are anchored at the start of the text they are tested
/// against, but not at the end: `W06` matches the code `W0613`.
pub struct OutputPattern {
    regex: Regex,
    always_report: Option<Regex>,
    source: String,
    always_source: Option<String>,
}

impl fmt::Debug for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputPattern")
            .field("regex", &self.source)
            .field("always_report", &self.always_source)
            .finish()
    }
}

impl OutputPattern {
    /// Compile a rule's output regex and optional always-report regex.
    ///
    /// Returns every problem found, so each can be reported.
    pub fn compile(regex: &str, always_report: Option<&str>) -> Result<Self, Vec<String>> {
        let mut problems = Vec::new();

        let compiled = match anchored(regex) {
            Ok(compiled) => {
                let names: Vec<&str> = compiled.capture_names().flatten().collect();
                let missing: Vec<&str> = REQUIRED_GROUPS
                    .iter()
                    .copied()
                    .filter(|group| !names.contains(group))
                    .collect();
                if !missing.is_empty() {
                    problems.push(format!(
                        "regex must capture (?P<file>..), (?P<line>..) and (?P<err>..); missing: {}",
                        missing.join(", ")
                    ));
                }
                Some(compiled)
            }
            Err(e) => {
                problems.push(format!("regex does not compile: {}", e));
                None
            }
        };

        let always = match always_report.map(anchored).transpose() {
            Ok(always) => always,
            Err(e) => {
                problems.push(format!("always_report does not compile: {}", e));
                None
            }
        };

        match compiled {
            Some(compiled) if problems.is_empty() => Ok(Self {
                regex: compiled,
                always_report: always,
                source: regex.to_string(),
                always_source: always_report.map(str::to_string),
            }),
            _ => Err(problems),
        }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn always_report(&self) -> Option<&Regex> {
        self.always_report.as_ref()
    }

    /// The output regex as written in configuration.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn always_source(&self) -> Option<&str> {
        self.always_source.as_deref()
    }
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})", pattern))
}

/// A validated, active lint rule.
#[derive(Debug)]
pub struct LintRule {
    pub name: String,
    /// Command template; `$@` (quoted as `"$@"`) expands to the files.
    pub command: String,
    pub pattern: OutputPattern,
    /// File extensions with their leading dot, e.g. `.py`.
    pub extensions: BTreeSet<String>,
}

/// Why a configuration section did not become an active rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleRejection {
    /// The section declares no extensions, so it never applies.
    Inactive { name: String },
    /// The section applies to files but cannot be run.
    Invalid { name: String, problems: Vec<String> },
}

impl LintRule {
    /// Build a rule from its configuration section.
    ///
    /// Validation rules:
    /// - `extensions` must list at least one extension, otherwise the
    ///   section is inactive
    /// - `command` must be non-empty and use balanced quotes
    /// - `regex` must compile and capture `file`, `line` and `err`
    /// - `always_report`, if present, must compile
    pub fn from_section(section: &Section) -> Result<Self, RuleRejection> {
        let name = section.name().to_string();

        let extensions: BTreeSet<String> = section
            .get("extensions")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if extensions.is_empty() {
            return Err(RuleRejection::Inactive { name });
        }

        let mut problems = Vec::new();

        let command = section.get("command").unwrap_or_default().trim();
        if command.is_empty() {
            problems.push("command is missing or empty".to_string());
        } else if let Err(e) = shell_words::split(command) {
            problems.push(format!("command cannot be parsed: {}", e));
        }

        let regex = section.get("regex").unwrap_or_default();
        let always_report = section.get("always_report").filter(|s| !s.is_empty());
        let pattern = match OutputPattern::compile(regex, always_report) {
            Ok(pattern) => Some(pattern),
            Err(mut pattern_problems) => {
                problems.append(&mut pattern_problems);
                None
            }
        };

        match pattern {
            Some(pattern) if problems.is_empty() => Ok(Self {
                name,
                command: command.to_string(),
                pattern,
                extensions,
            }),
            _ => Err(RuleRejection::Invalid { name, problems }),
        }
    }

    pub fn applies_to(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}
