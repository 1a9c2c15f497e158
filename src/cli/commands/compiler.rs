//! The `extdep compiler` command.
//!
//! Shows which compiler was identified for a language and the flags its
//! policy selects.

use crate::cli::args::CompilerArgs;
use crate::compiler::FlagPolicy;
use crate::config::ExtdepConfig;
use crate::dependency::EnvOverrides;
use crate::error::Result;
use crate::shell::{SystemRunner, ToolRunner};
use crate::ui::{hints, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::format_args;
use super::toolchain;

/// The compiler command implementation.
pub struct CompilerCommand {
    config: ExtdepConfig,
    args: CompilerArgs,
    env: EnvOverrides,
}

impl CompilerCommand {
    pub fn new(config: ExtdepConfig, args: CompilerArgs) -> Self {
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

    pub fn run(&self, ui: &mut dyn UserInterface, runner: &dyn ToolRunner) -> Result<CommandResult> {
        let language = self.args.language;
        let identity = toolchain::identity_for(
            &self.config,
            &self.env,
            runner,
            self.args.compiler_id.as_deref(),
        )?;

        let info = match identity.identify(language) {
            Ok(info) => info,
            Err(e) => {
                ui.error(&e.to_string());
                if ui.output_mode().shows_decoration() {
                    ui.show_hint(&hints::compiler_not_identified(language.compiler_env_var()));
                }
                return Ok(CommandResult::failure(1));
            }
        };
        let policy = FlagPolicy::for_compiler(&info);

        if ui.output_mode().shows_decoration() {
            ui.show_header(&format!("{} compiler", language));
        }
        ui.show_detail("Compiler", info.id.as_str());
        ui.show_detail("Version", &info.version);
        if let Some(path) = &info.path {
            ui.show_detail("Path", &path.display().to_string());
        }
        if !policy.supported_standards().is_empty() {
            let mut standards = vec!["none"];
            standards.extend_from_slice(policy.supported_standards());
            ui.show_detail("Standards", &standards.join(", "));
        }

        if let Some(std) = &self.args.std {
            match policy.standard_args(std) {
                Ok(args) => ui.show_detail("Standard flags", &format_args(&args)),
                Err(e) => {
                    ui.error(&e.to_string());
                    return Ok(CommandResult::failure(1));
                }
            }
        }
        if let Some(level) = self.args.warn_level {
            ui.show_detail("Warning flags", &format_args(&policy.warn_args(level)));
        }

        Ok(CommandResult::success())
    }
}

impl Command for CompilerCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run(ui, &SystemRunner::new())
    }
}
