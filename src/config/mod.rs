//! Configuration model for lint-diffs.
//!
//! Configuration is INI text layered from several locations (built-in
//! defaults < `~/.config/lint-diffs` < `.lint_diffs` < `.lint-diffs`),
//! patched with command-line overrides, then frozen into an immutable
//! [`Config`]. A `[main]` section holds `debug`, `strict` and `parallel`;
//! every other section is a lint rule with `extensions`, `command`,
//! `regex` and an optional `always_report`.

mod builder;
mod ini;
mod model;
mod rule;
mod value;


// Re-export public API
pub use builder::{ConfigBuilder, MAIN_SECTION, Override};
pub use model::Config;
pub use rule::{FILES_PLACEHOLDER, LintRule, OutputPattern};
