//! Synchronous external-command boundary.
//!
//! Every interaction with the solver suite is a run-to-completion process
//! call returning (status, stdout, stderr). There is no timeout and no
//! cancellation: an unresponsive tool blocks the caller.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One external command, described before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// When false, stdout goes to the null device (solver logs are large).
    pub capture_stdout: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture_stdout: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn discard_stdout(mut self) -> Self {
        self.capture_stdout = false;
        self
    }

    /// Program and arguments joined by spaces, for diagnostics.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub command: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Trimmed stderr, or trimmed stdout when the tool wrote nothing to stderr.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Runs invocations to completion.
///
/// A non-zero exit status is reported through [`CommandOutput::status`], not
/// as an `Err`; only failing to start the process at all is an error here.
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> CoreResult<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> CoreResult<CommandOutput> {
        let command_line = invocation.command_line();
        tracing::debug!(command = %command_line, cwd = ?invocation.cwd, "spawning");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .stdout(if invocation.capture_stdout {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().map_err(|source| CoreError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        tracing::trace!(command = %command_line, status = ?output.status.code(), "finished");

        Ok(CommandOutput {
            command: command_line,
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
