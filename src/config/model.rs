//! Frozen configuration consumed by the rest of the pipeline.

use super::rule::{LintRule, RuleRejection};

/// Global scalars from the `[main]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Debug logging, and pass unmatched linter output through.
    pub debug: bool,
    /// Treat a missing lint command as a failure.
    pub strict: bool,
    /// Number of rules run concurrently (at least 1).
    pub parallel: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            strict: false,
            parallel: 1,
        }
    }
}

/// Immutable configuration: settings plus the active rules in
/// configuration order.
///
/// Produced by [`super::ConfigBuilder::freeze`]; never modified afterwards.
#[derive(Debug, Default)]
pub struct Config {
    settings: Settings,
    rules: Vec<LintRule>,
    rejected: Vec<RuleRejection>,
}

impl Config {
    pub(super) fn new(settings: Settings, rules: Vec<LintRule>, rejected: Vec<RuleRejection>) -> Self {
        Self {
            settings,
            rules,
            rejected,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Active rules in configuration order.
    pub fn rules(&self) -> &[LintRule] {
        &self.rules
    }

    #[cfg(test)]
    pub fn rule(&self, name: &str) -> Option<&LintRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Sections that did not become active rules, and why.
    pub fn rejected(&self) -> &[RuleRejection] {
        &self.rejected
    }
}
