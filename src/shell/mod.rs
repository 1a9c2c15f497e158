//! External tool execution and platform helpers.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{render_command, CommandResult, SystemRunner, ToolRunner};
pub use mock::MockRunner;
pub use platform::{home_dir, is_ci, is_executable, parse_system_path, resolve_tool_path};
