//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once and routes CLI subcommands to their implementations.
//! Commands that run external tools also expose a `run` method taking a
//! [`ToolRunner`](crate::shell::ToolRunner), so tests can substitute a
//! [`MockRunner`](crate::shell::MockRunner).

pub mod check;
pub mod compiler;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod resolve;
pub mod toolchain;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
