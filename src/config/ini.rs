//! INI layers and per-key merging.
//!
//! Files are read with `rust-ini` in the configparser-compatible mode that
//! lint-diffs configuration uses: `[section]` headers, `key = value` or
//! `key: value` entries, full-line `#`/`;` comments and indented
//! continuation lines. Quotes and backslashes are kept verbatim so regexes
//! survive. Keys are lower-cased; section names are case-sensitive.
//!
//! A `[DEFAULT]` section supplies fallback values to every other section
//! and is never a section of its own.

use crate::error::{LintDiffsError, Result};
use ::ini::{Ini, ParseOption};

/// Section whose entries every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One `[name]` section with its entries in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a value by key (keys are case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a value, replacing an existing entry with the same key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let key = key.to_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// An ordered collection of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<Section>,
}

impl IniDocument {
    /// Parse INI text. `origin` names the source in error messages.
    ///
    /// # Returns
    ///
    /// * `Ok(IniDocument)` - Parsed sections
    /// * `Err(LintDiffsError::ConfigError)` - Syntax error, or an entry
    ///   outside any section
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };

        let parsed = Ini::load_from_str_opt(text, options)
            .map_err(|e| LintDiffsError::ConfigError(format!("{}: {}", origin, e)))?;

        let mut doc = IniDocument::default();
        for (name, properties) in parsed.iter() {
            let Some(name) = name else {
                if let Some((key, _)) = properties.iter().next() {
                    return Err(LintDiffsError::ConfigError(format!(
                        "{}: entry '{}' outside of any [section]",
                        origin, key
                    )));
                }
                continue;
            };

            let section = doc.section_mut(name.trim());
            for (key, value) in properties.iter() {
                section.set(key.trim(), value.trim());
            }
        }

        Ok(doc)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Get a section for editing, appending it if it does not exist yet.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    /// Sections other than `[DEFAULT]`, each with the defaults filled in.
    pub fn resolved_sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections
            .iter()
            .filter(|s| s.name != DEFAULT_SECTION)
            .map(|s| self.resolve(s))
    }

    /// Value of `key` in `section`, falling back to `[DEFAULT]`.
    pub fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)
            .and_then(|s| s.get(key))
            .or_else(|| self.section(DEFAULT_SECTION)?.get(key))
    }

    /// Overlay another document: later values win per section and key.
    pub fn merge(&mut self, other: IniDocument) {
        for section in other.sections {
            let target = self.section_mut(&section.name);
            for (key, value) in section.entries {
                target.set(&key, value);
            }
        }
    }

    fn resolve(&self, section: &Section) -> Section {
        let mut resolved = Section::new(section.name.as_str());
        if let Some(defaults) = self.section(DEFAULT_SECTION) {
            for (key, value) in &defaults.entries {
                resolved.set(key, value.as_str());
            }
        }
        for (key, value) in &section.entries {
            resolved.set(key, value.as_str());
        }
        resolved
    }
}
