//! External tool execution.
//!
//! Probes never call [`std::process::Command`] directly; they go through a
//! [`ToolRunner`] so the resolver can be exercised without spawning anything
//! (see [`MockRunner`](super::MockRunner)).

use crate::error::{ExtdepError, Result};
use std::io::Read;
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Stdout followed by stderr, for tools that print banners on either.
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Runs one external tool invocation to completion.
///
/// Implementations must be blocking: when `run` returns, no child process
/// started by the call is still alive.
pub trait ToolRunner {
    /// Run `program` with `args` and capture its output.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`], not as
    /// an error. Errors are reserved for the tool being missing
    /// ([`ExtdepError::ToolNotFound`]) or the process not completing.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult>;
}

/// Render a program and its arguments as a single display string.
pub fn render_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// [`ToolRunner`] backed by real child processes.
///
/// Children inherit the current working directory and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult> {
        let start = Instant::now();
        let command_line = render_command(program, args);

        let mut cmd = Command::new(program);
        cmd.args(args);

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExtdepError::ToolNotFound {
                    program: program.to_string(),
                }
            } else {
                ExtdepError::CommandFailed {
                    command: command_line.clone(),
                    code: None,
                }
            }
        })?;

        let mut guard = ChildGuard::new(child);

        // Drain both pipes concurrently so a chatty tool can't fill one
        // buffer and block while we wait on the other.
        let stdout_handle = read_stdout(guard.child.stdout.take());
        let stderr_handle = read_stderr(guard.child.stderr.take());

        let status = guard.wait().map_err(|_| ExtdepError::CommandFailed {
            command: command_line.clone(),
            code: None,
        })?;

        let stdout = stdout_handle.join().unwrap_or_default();
        let stderr = stderr_handle.join().unwrap_or_default();
        let duration = start.elapsed();

        tracing::trace!("{} exited with {:?}", command_line, status.code());

        if status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}

/// Owns a spawned child until it has been reaped.
///
/// Dropping the guard before [`ChildGuard::wait`] succeeded kills and reaps
/// the child, so early returns and unwinding never leak a process.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn wait(&mut self) -> std::io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

fn read_stdout(pipe: Option<ChildStdout>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).to_string()
    })
}

fn read_stderr(pipe: Option<ChildStderr>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).to_string()
    })
}
