//! External process execution with merged output.

use crate::error::{LintDiffsError, Result};
use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};

/// Exit status and combined stdout/stderr text of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub returncode: i32,
    pub output: String,
}

impl ProcessOutput {
    pub fn new(returncode: i32, output: impl Into<String>) -> Self {
        Self {
            returncode,
            output: output.into(),
        }
    }
}

/// The capability to run an external command to completion.
///
/// `argv[0]` is the program. Implementations return
/// [`LintDiffsError::CommandNotFound`] when the program cannot be located
/// or is not executable, and [`LintDiffsError::CommandExecutionError`] for
/// any other failure.
pub trait CommandRunner: Sync {
    fn run(&self, argv: &[String]) -> Result<ProcessOutput>;
}

/// Runs commands as child processes of this one.
///
/// Standard output and standard error share one pipe, so their text is
/// interleaved in the order the tool wrote it. Standard input is closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<ProcessOutput> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            LintDiffsError::CommandExecutionError("command is empty".to_string())
        })?;

        let io_error = |what: &str, e: std::io::Error| {
            LintDiffsError::CommandExecutionError(format!("{} for '{}': {}", what, program, e))
        };

        let (mut reader, writer) = std::io::pipe().map_err(|e| io_error("failed to create pipe", e))?;
        let stderr_writer = writer
            .try_clone()
            .map_err(|e| io_error("failed to create pipe", e))?;

        // The Command owns our copies of the write end; dropping it before
        // reading lets the reader see EOF once the child exits.
        let mut child = {
            let mut command = Command::new(program);
            command
                .args(args)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr_writer);
            command.spawn().map_err(|e| spawn_error(program, e))?
        };

        let mut bytes = Vec::new();
        let read_result = reader.read_to_end(&mut bytes);
        let status = child
            .wait()
            .map_err(|e| io_error("failed to wait on command", e))?;
        read_result.map_err(|e| io_error("failed to read output", e))?;

        Ok(ProcessOutput::new(
            exit_code(status),
            String::from_utf8_lossy(&bytes),
        ))
    }
}

fn spawn_error(program: &str, e: std::io::Error) -> LintDiffsError {
    use std::io::ErrorKind;

    if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) {
        LintDiffsError::CommandNotFound(program.to_string())
    } else {
        LintDiffsError::CommandExecutionError(format!(
            "failed to execute '{}': {}\nFix: ensure the command is installed and executable.",
            program, e
        ))
    }
}

/// Exit code of a finished process; `128 + signal` when killed by a signal.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
