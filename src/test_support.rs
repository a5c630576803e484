//! Shared fixtures for unit tests.

use crate::error::{LintDiffsError, Result};
use crate::runner::{CommandRunner, ProcessOutput};
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) const DIFF_OUTPUT: &str = "
diff --git a/test/badcode.py b/test/badcode.py
index 81e7297..dcdbd1f 100644
--- a/test/badcode.py
+++ b/test/badcode.py
@@ -2 +2 @@ def foo(baz):
-    print(bar);
+    print(bar)
    ";

pub(crate) const GOOD_DIFF_OUTPUT: &str = "
diff --git a/test/goodcode.py b/test/goodcode.py
index 81e7297..dcdbd1f 100644
--- a/test/goodcode.py
+++ b/test/goodcode.py
@@ -2 +2 @@ def foo(baz):
-    print(bar);
+    print(bar)
    ";

pub(crate) const NOT_LINT_TXT_DIFF: &str = "
diff --git a/test/some.txt b/test/some.txt
index 81e7297..dcdbd1f 100644
--- a/test/some.txt
+++ b/test/some.txt
@@ -2 +2 @@ def foo(baz):
-    print(bar);
+    print(bar)
    ";

pub(crate) const PYLINT_OUTPUT: &str = r#"************* Module badcode
test/badcode.py:1:0: C0111: Missing module docstring (missing-docstring)
test/badcode.py:1:0: C0102: Black listed name "foo" (blacklisted-name)
test/badcode.py:1:0: C0102: Black listed name "baz" (blacklisted-name)
test/badcode.py:1:0: C0111: Missing function docstring (missing-docstring)
test/badcode.py:2:10: E0602: Undefined variable 'bar' (undefined-variable)
test/badcode.py:1:8: W0613: Unused argument 'baz' (unused-argument)
test/badcode.py:XX:ZZ: FFF: Bad lineno is allowed, but only reported if code matches

----------------------------------------------------------------------
Your code has been rated at -40.00/10 (previous run: -40.00/10, +0.00)"#;

/// Pylint output with a single finding, on a line the diff does not touch.
pub(crate) const PYLINT_OUTPUT_UNCHANGED_LINE: &str = r#"************* Module badcode
test/badcode.py:1:10: E0602: Undefined variable 'bar' (undefined-variable)

----------------------------------------------------------------------
Your code has been rated at -40.00/10 (previous run: -40.00/10, +0.00)"#;

pub(crate) const FLAKE8_OUTPUT: &str = "test/badcode.py:1:1: D100 Missing docstring in public module
test/badcode.py:1:9: W0613 unused argument 'baz'
test/badcode.py:2:11: F821 undefined name 'bar'
";

pub(crate) const DIFF_CPP: &str = "
diff --git a/src/vsss.cpp b/src/vsss.cpp
index 81e7297..dcdbd1f 100644
--- a/src/vsss.cpp
+++ b/src/vsss.cpp
@@ -6 +6 @@ void foo(int baz):
-    print(bar)
+    print(bar);
    ";

pub(crate) const CLANG_OUTPUT: &str = r#"
32069 warnings generated.
src/vsss.cpp:725:18: note: the definition seen here
bool Vida::Kata::vsss_verify(const std::string & share_json) {
                 ^
src/vsss.cpp:6:1: warning: #includes are not sorted properly [llvm-include-order]
#include "json.hpp"
^        ~~~~~~~~~~
         "bignum.hpp"
src/vsss.cpp:31:24: warning: pass by value and use std::move [modernize-pass-by-value]
vsss_share::vsss_share(Bignum _index, Bignum _data, int _m, int _n, const ECPtr &_gen, const ECPtr &_gen_k,
                       ^
src/vsss.cpp:31:88: warning: pass by value and use std::move [modernize-pass-by-value]
"#;

enum Response {
    Output(ProcessOutput),
    Fail(String),
}

/// A [`CommandRunner`] that answers from a script keyed by program name.
///
/// Programs with no scripted response are reported as not found. Every
/// call is recorded.
#[derive(Default)]
pub(crate) struct FakeRunner {
    responses: HashMap<String, Response>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, program: &str, returncode: i32, output: &str) -> Self {
        self.responses.insert(
            program.to_string(),
            Response::Output(ProcessOutput::new(returncode, output)),
        );
        self
    }

    pub(crate) fn fail(mut self, program: &str, message: &str) -> Self {
        self.responses
            .insert(program.to_string(), Response::Fail(message.to_string()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, argv: &[String]) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(argv.to_vec());

        let program = argv.first().map(String::as_str).unwrap_or_default();
        match self.responses.get(program) {
            Some(Response::Output(output)) => Ok(output.clone()),
            Some(Response::Fail(message)) => {
                Err(LintDiffsError::CommandExecutionError(message.clone()))
            }
            None => Err(LintDiffsError::CommandNotFound(program.to_string())),
        }
    }
}
