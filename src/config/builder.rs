//! Layered configuration loading and override application.
//!
//! Configuration is assembled in an editable [`ConfigBuilder`]: built-in
//! defaults first, then each existing configuration file in precedence
//! order, then discrete [`Override`] operations from the command line.
//! [`ConfigBuilder::freeze`] validates everything into an immutable
//! [`Config`].

use super::ini::IniDocument;
use super::model::{Config, Settings};
use super::rule::{LintRule, RuleRejection};
use super::value::{TypedValue, parse_value};
use crate::error::{LintDiffsError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, error};

/// Name of the section holding global settings.
pub const MAIN_SECTION: &str = "main";

/// User-global configuration file.
pub const USER_CONFIG: &str = "~/.config/lint-diffs";

/// Project-local configuration files, lowest precedence first.
pub const PROJECT_CONFIGS: [&str; 2] = [".lint_diffs", ".lint-diffs"];

const DEFAULT_CONFIG: &str = include_str!("default_config.ini");

/// A single `section:key=value` assignment applied after layering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl Override {
    pub fn new(section: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Override {
    type Err = LintDiffsError;

    /// Parse `name:key=value`. The value may itself contain `:` and `=`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || {
            LintDiffsError::UserError(format!(
                "invalid option '{}': expected NAME:KEY=VALUE (e.g. pylint:always_report=W0613)",
                s
            ))
        };

        let (section, rest) = s.split_once(':').ok_or_else(malformed)?;
        let (key, value) = rest.split_once('=').ok_or_else(malformed)?;
        let (section, key) = (section.trim(), key.trim());
        if section.is_empty() || key.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(section, key, value))
    }
}

/// Editable configuration under construction.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    document: IniDocument,
    sources: Vec<PathBuf>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        let mut document = IniDocument::default();
        document.section_mut(MAIN_SECTION);
        Self {
            document,
            sources: Vec::new(),
        }
    }
}

impl ConfigBuilder {
    /// An empty builder with only a `[main]` section.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder seeded with the built-in default configuration.
    pub fn with_defaults() -> Result<Self> {
        let mut builder = Self::new();
        builder.merge_str(DEFAULT_CONFIG, "built-in defaults")?;
        Ok(builder)
    }

    /// Overlay INI text; its values win over everything merged so far.
    pub fn merge_str(&mut self, text: &str, origin: &str) -> Result<()> {
        let layer = IniDocument::parse(text, origin)?;
        self.document.merge(layer);
        Ok(())
    }

    /// Overlay a configuration file if it exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The file was read and merged
    /// * `Ok(false)` - The file does not exist
    /// * `Err(LintDiffsError::ConfigError)` - The file is unreadable or malformed
    pub fn merge_file(&mut self, path: &Path) -> Result<bool> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(LintDiffsError::ConfigError(format!(
                    "failed to read config file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        self.merge_str(&text, &path.display().to_string())?;
        self.sources.push(path.to_path_buf());
        Ok(true)
    }

    /// Merge every configuration layer that exists, lowest precedence first.
    ///
    /// `user_config` replaces the default user-global location.
    pub fn load_layers(&mut self, user_config: Option<&Path>, project_dir: &Path) -> Result<()> {
        for path in layer_paths(user_config, project_dir) {
            if self.merge_file(&path)? {
                debug!("loaded config {}", path.display());
            }
        }
        Ok(())
    }

    /// Set one key, creating the section if needed.
    pub fn apply(&mut self, op: &Override) {
        self.document.section_mut(&op.section).set(&op.key, op.value.as_str());
    }

    pub fn apply_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a Override>) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Files merged so far, in merge order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Whether `[main] debug` is currently set, for choosing the log level
    /// before freezing.
    pub fn debug_enabled(&self) -> bool {
        self.main_value("debug")
            .and_then(|v| parse_value(v).as_flag())
            .unwrap_or(false)
    }

    /// Validate and freeze into an immutable [`Config`].
    ///
    /// Invalid `[main]` values and invalid rules are logged and skipped;
    /// freezing itself never fails.
    pub fn freeze(self) -> Config {
        let settings = self.settings();

        let mut rules = Vec::new();
        let mut rejected = Vec::new();
        for section in self.document.resolved_sections() {
            if section.name() == MAIN_SECTION {
                continue;
            }

            match LintRule::from_section(&section) {
                Ok(rule) => rules.push(rule),
                Err(rejection) => {
                    match &rejection {
                        RuleRejection::Inactive { name } => {
                            debug!("Ignoring {} section with no file extensions", name);
                        }
                        RuleRejection::Invalid { name, problems } => {
                            for problem in problems {
                                error!("Invalid rule {}: {}, skipping", name, problem);
                            }
                        }
                    }
                    rejected.push(rejection);
                }
            }
        }

        Config::new(settings, rules, rejected)
    }

    fn main_value(&self, key: &str) -> Option<&str> {
        self.document.lookup(MAIN_SECTION, key)
    }

    fn settings(&self) -> Settings {
        let mut settings = Settings::default();

        for (key, slot) in [("debug", &mut settings.debug), ("strict", &mut settings.strict)] {
            if let Some(raw) = self.main_value(key).filter(|v| !v.is_empty()) {
                match parse_value(raw) {
                    TypedValue::Error(reason) => error!("Invalid value for main.{}: {}", key, reason),
                    value => *slot = value.as_flag().unwrap_or(*slot),
                }
            }
        }

        if let Some(raw) = self.main_value("parallel") {
            match parse_value(raw) {
                TypedValue::Error(reason) => error!("Invalid value for main.parallel: {}", reason),
                value => match value.as_positive() {
                    Some(n) => settings.parallel = n,
                    None => error!(
                        "Invalid value for main.parallel: '{}' is not a positive integer",
                        raw
                    ),
                },
            }
        }

        settings
    }
}

/// Candidate configuration files, lowest precedence first.
pub fn layer_paths(user_config: Option<&Path>, project_dir: &Path) -> Vec<PathBuf> {
    let user = match user_config {
        Some(path) => expand_home(path),
        None => expand_home(Path::new(USER_CONFIG)),
    };

    let mut paths = vec![user];
    paths.extend(PROJECT_CONFIGS.iter().map(|name| project_dir.join(name)));
    paths
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match home::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
