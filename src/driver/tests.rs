//! End-to-end tests for the driver with a scripted command runner.

use super::*;
use crate::config::{ConfigBuilder, Override};
use crate::test_support::{
    CLANG_OUTPUT, DIFF_CPP, DIFF_OUTPUT, FLAKE8_OUTPUT, FakeRunner, GOOD_DIFF_OUTPUT,
    NOT_LINT_TXT_DIFF, PYLINT_OUTPUT, PYLINT_OUTPUT_UNCHANGED_LINE,
};

fn config(options: &[&str]) -> Config {
    let mut builder = ConfigBuilder::with_defaults().unwrap();
    let overrides: Vec<Override> = options.iter().map(|s| s.parse().unwrap()).collect();
    builder.apply_all(&overrides);
    builder.freeze()
}

fn run_captured(config: &Config, runner: &FakeRunner, diff: &str) -> (i32, String) {
    let mut out = Vec::new();
    let code = run(config, runner, diff, &mut out);
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_default_config_reports_changed_lines_only() {
    let runner = FakeRunner::new().respond("pylint", 16, PYLINT_OUTPUT);

    let (code, out) = run_captured(&config(&[]), &runner, DIFF_OUTPUT);

    assert_eq!(code, 16);
    assert!(out.contains("E0602"));
    assert!(!out.contains("W0613"));
    assert!(out.contains("=== pylint: mine=1, always=0\n\n"));
    assert_eq!(
        runner.calls(),
        vec![vec!["pylint".to_string(), "test/badcode.py".to_string()]]
    );
}

#[test]
fn test_always_report() {
    let runner = FakeRunner::new().respond("pylint", 16, PYLINT_OUTPUT);
    let config = config(&["main:debug=true", "pylint:always_report=W0613"]);

    let (code, out) = run_captured(&config, &runner, DIFF_OUTPUT);

    assert_ne!(code, 0);
    assert!(out.contains("W0613"));
    assert!(out.contains("E0602"));
    assert!(out.contains("=== pylint: mine=1, always=1"));
    // Debug mode passes unmatched lines through
    assert!(out.contains("# ************* Module badcode"));
}

#[test]
fn test_finding_off_the_diff_does_not_fail() {
    let runner = FakeRunner::new().respond("pylint", 1, PYLINT_OUTPUT_UNCHANGED_LINE);

    let (code, out) = run_captured(&config(&[]), &runner, DIFF_OUTPUT);

    assert_eq!(code, 0);
    assert!(!out.contains("test/badcode.py"));
    assert_eq!(out, "=== pylint: mine=0, always=0\n\n");
}

#[test]
fn test_unchanged_file_findings_do_not_fail() {
    let runner = FakeRunner::new().respond("pylint", 16, PYLINT_OUTPUT);

    let (code, out) = run_captured(&config(&[]), &runner, GOOD_DIFF_OUTPUT);

    assert_eq!(code, 0);
    assert!(!out.contains("E0602"));
}

#[test]
fn test_no_matching_rule_does_nothing() {
    let runner = FakeRunner::new();

    let (code, out) = run_captured(&config(&["main:debug=true"]), &runner, NOT_LINT_TXT_DIFF);

    assert_eq!(code, 0);
    assert_eq!(out, "");
    assert!(runner.calls().is_empty());
}

#[test]
fn test_garbage_diff_degrades_to_no_work() {
    let runner = FakeRunner::new();

    let (code, out) = run_captured(&config(&[]), &runner, "this is not a diff\n");

    assert_eq!(code, 0);
    assert_eq!(out, "");
    assert!(runner.calls().is_empty());
}

#[test]
fn test_custom_rule_from_options() {
    let runner = FakeRunner::new().respond("echo", 0, "hi test/some.txt\n");
    let config = config(&[
        "txt:extensions=.txt",
        "txt:command=echo hi",
        r"txt:regex=(?P<file>[^:]+):(?P<line>\d+):[^:]+: (?P<err>[^ :]+)",
    ]);

    let (code, out) = run_captured(&config, &runner, NOT_LINT_TXT_DIFF);

    assert_eq!(code, 0);
    assert_eq!(
        runner.calls(),
        vec![vec![
            "echo".to_string(),
            "hi".to_string(),
            "test/some.txt".to_string()
        ]]
    );
    assert_eq!(out, "=== txt: mine=0, always=0\n\n");
}

#[test]
fn test_clang_tidy_finding_fails_with_tool_status() {
    let runner = FakeRunner::new().respond("clang-tidy", 1, CLANG_OUTPUT);
    let config = config(&["clang-tidy:extensions=.cpp .hpp"]);

    let (code, out) = run_captured(&config, &runner, DIFF_CPP);

    assert_eq!(code, 1);
    assert!(out.contains("[llvm-include-order]"));
    assert!(!out.contains("modernize-pass-by-value"));
}

#[test]
fn test_parallel_rules_print_whole_blocks() {
    let runner = FakeRunner::new()
        .respond("pylint", 16, PYLINT_OUTPUT)
        .respond("flake8", 1, FLAKE8_OUTPUT);
    let config = config(&["main:parallel=2", "flake8:extensions=.py"]);

    let (code, out) = run_captured(&config, &runner, DIFF_OUTPUT);

    assert_eq!(code, 16);
    assert!(out.contains("E0602"));
    assert!(out.contains("F821"));
    assert_eq!(runner.calls().len(), 2);

    // Each block is a finding line followed by its own summary
    let pylint_block = "test/badcode.py:2:10: E0602: Undefined variable 'bar' (undefined-variable)\n\
                        === pylint: mine=1, always=0\n\n";
    let flake8_block = "test/badcode.py:2:11: F821 undefined name 'bar'\n\
                        === flake8: mine=1, always=0\n\n";
    assert!(out.contains(pylint_block));
    assert!(out.contains(flake8_block));
    assert_eq!(out.len(), pylint_block.len() + flake8_block.len());
}

#[test]
fn test_sequential_runs_rules_in_configuration_order() {
    let runner = FakeRunner::new()
        .respond("pylint", 0, "")
        .respond("flake8", 0, "");
    let config = config(&["flake8:extensions=.py"]);

    let (code, out) = run_captured(&config, &runner, DIFF_OUTPUT);

    assert_eq!(code, 0);
    assert_eq!(
        out,
        "=== pylint: mine=0, always=0\n\n=== flake8: mine=0, always=0\n\n"
    );
}

#[test]
fn test_missing_command_fails_only_when_strict() {
    let runner = FakeRunner::new();

    let strict = config(&["main:strict=true", "pylint:command=no-such-command"]);
    let (code, out) = run_captured(&strict, &runner, DIFF_OUTPUT);
    assert_eq!(code, 1);
    assert!(out.contains("no-such-command"));

    let lenient = config(&["pylint:command=no-such-command"]);
    let (code, _) = run_captured(&lenient, &runner, DIFF_OUTPUT);
    assert_eq!(code, 0);
}

#[test]
fn test_execution_error_fails_only_that_rule() {
    let runner = FakeRunner::new()
        .fail("pylint", "permission denied")
        .respond("flake8", 0, FLAKE8_OUTPUT);
    let config = config(&["flake8:extensions=.py"]);

    let (code, out) = run_captured(&config, &runner, DIFF_OUTPUT);

    assert_eq!(code, 1);
    assert!(out.contains("=== pylint: error: command execution failed: permission denied\n\n"));
    assert!(out.contains("=== flake8: mine=1, always=0"));
}
