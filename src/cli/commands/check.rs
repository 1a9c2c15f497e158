//! The `extdep check` command.
//!
//! Resolves every dependency declared under `dependencies:` and reports a
//! table of what was found.

use crate::cli::args::CheckArgs;
use crate::config::ExtdepConfig;
use crate::dependency::{resolve_dependency, EnvOverrides, ResolutionResult};
use crate::error::{ExtdepError, Result};
use crate::shell::{SystemRunner, ToolRunner};
use crate::ui::{hints, Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::toolchain;

/// Exit code when no dependencies are declared.
const EXIT_NOTHING_TO_CHECK: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    config: ExtdepConfig,
    args: CheckArgs,
    env: EnvOverrides,
}

impl CheckCommand {
    pub fn new(config: ExtdepConfig, args: CheckArgs) -> Self {
        Self {
            config,
            args,
            env: EnvOverrides::from_env(),
        }
    }

    pub fn with_env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    /// Resolve every declared dependency, in name order.
    pub fn resolve_all(&self, runner: &dyn ToolRunner) -> Vec<(bool, ResolutionResult)> {
        let identity = toolchain::detected_identity(&self.config, &self.env, runner);
        let ctx = toolchain::probe_context(&self.config, runner);

        self.config
            .dependencies
            .iter()
            .map(|(name, dep)| {
                let request = self.config.request_for(name, dep);
                let result = resolve_dependency(&request, &identity, &self.env, &ctx);
                (request.required(), result)
            })
            .collect()
    }

    pub fn run(&self, ui: &mut dyn UserInterface, runner: &dyn ToolRunner) -> Result<CommandResult> {
        if self.config.dependencies.is_empty() {
            ui.warning("No dependencies configured");
            if ui.output_mode().shows_decoration() {
                ui.show_hint(hints::no_dependencies_configured());
            }
            return Ok(CommandResult::failure(EXIT_NOTHING_TO_CHECK));
        }

        let results = self.resolve_all(runner);
        let missing_required: Vec<&ResolutionResult> = results
            .iter()
            .filter(|(required, result)| *required && !result.is_found())
            .map(|(_, result)| result)
            .collect();

        if self.args.json {
            let all: Vec<&ResolutionResult> = results.iter().map(|(_, r)| r).collect();
            let json =
                serde_json::to_string_pretty(&all).map_err(|e| ExtdepError::Other(e.into()))?;
            ui.message(&json);
        } else {
            if ui.output_mode().shows_decoration() {
                ui.show_header("Dependencies");
            }
            ui.message(&Self::table(&results).render());
            for (_, result) in &results {
                display::show_failures(ui, result);
            }
            for result in &missing_required {
                if let Err(e) = (*result).clone().require() {
                    ui.error(&e.to_string());
                }
            }
        }

        if missing_required.is_empty() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }

    fn table(results: &[(bool, ResolutionResult)]) -> Table {
        let mut table = Table::new(vec!["Name", "Status", "Version", "Source"]);
        for (required, result) in results {
            let status = match (result.is_found(), required) {
                (true, _) => "found",
                (false, true) => "missing",
                (false, false) => "missing (optional)",
            };
            let source = result.source().map(|s| s.to_string()).unwrap_or_default();
            table.add_row(vec![
                result.name(),
                status,
                result.version().unwrap_or("-"),
                source.as_str(),
            ]);
        }
        table
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run(ui, &SystemRunner::new())
    }
}
