//! Scripted tool runner for testing.
//!
//! `MockRunner` implements [`ToolRunner`] without spawning processes. Each
//! expected command line is mapped to a canned response, and every call is
//! recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use extdep::shell::{MockRunner, ToolRunner};
//!
//! let runner = MockRunner::new()
//!     .on_success("pkg-config --modversion lapack", "3.9.0\n")
//!     .on_failure("pkg-config --modversion lapacke", 1, "");
//!
//! let out = runner.run("pkg-config", &["--modversion".into(), "lapack".into()]).unwrap();
//! assert_eq!(out.stdout.trim(), "3.9.0");
//! assert_eq!(runner.calls(), vec!["pkg-config --modversion lapack".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::error::{ExtdepError, Result};

use super::command::{render_command, CommandResult, ToolRunner};

/// Mock runner that answers from a script and records every call.
///
/// Command lines with no scripted response exit with code 1 and no output,
/// which is what most detection tools do for an unknown package.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, CommandResult>,
    missing_programs: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful invocation.
    pub fn on_success(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses.insert(
            command_line.to_string(),
            CommandResult::success(stdout.to_string(), String::new(), Duration::ZERO),
        );
        self
    }

    /// Script a failing invocation.
    pub fn on_failure(mut self, command_line: &str, code: i32, stderr: &str) -> Self {
        self.responses.insert(
            command_line.to_string(),
            CommandResult::failure(Some(code), String::new(), stderr.to_string(), Duration::ZERO),
        );
        self
    }

    /// Pretend `program` is not installed.
    pub fn without_program(mut self, program: &str) -> Self {
        self.missing_programs.insert(program.to_string());
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of commands run so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Whether any recorded command line starts with `prefix`.
    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }
}

impl ToolRunner for MockRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandResult> {
        let command_line = render_command(program, args);
        self.calls.borrow_mut().push(command_line.clone());

        if self.missing_programs.contains(program) {
            return Err(ExtdepError::ToolNotFound {
                program: program.to_string(),
            });
        }

        Ok(self.responses.get(&command_line).cloned().unwrap_or_else(|| {
            CommandResult::failure(Some(1), String::new(), String::new(), Duration::ZERO)
        }))
    }
}
