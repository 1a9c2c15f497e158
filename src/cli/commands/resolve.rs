//! The `extdep resolve` command.
//!
//! Resolves one dependency and prints its compile and link flags.

use crate::cli::args::ResolveArgs;
use crate::config::ExtdepConfig;
use crate::dependency::{resolve_dependency, EnvOverrides, LinkMode, ResolutionRequest};
use crate::error::{ExtdepError, Result};
use crate::shell::{SystemRunner, ToolRunner};
use crate::ui::{hints, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::toolchain;

/// The resolve command implementation.
pub struct ResolveCommand {
    config: ExtdepConfig,
    args: ResolveArgs,
    env: EnvOverrides,
}

impl ResolveCommand {
    /// Create a resolve command reading overrides from the process environment.
    pub fn new(config: ExtdepConfig, args: ResolveArgs) -> Self {
        Self {
            config,
            args,
            env: EnvOverrides::from_env(),
        }
    }

    /// Use a fixed override snapshot instead of the process environment.
    pub fn with_env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    /// The request described by the arguments.
    ///
    /// With no `--method`, the configured default strategies apply.
    pub fn request(&self) -> ResolutionRequest {
        let strategies = if self.args.method.is_empty() {
            self.config.settings.default_strategies.clone()
        } else {
            self.args.method.clone()
        };
        ResolutionRequest::builder(&self.args.name)
            .language(self.args.language)
            .link_mode(if self.args.static_link {
                LinkMode::Static
            } else {
                LinkMode::Shared
            })
            .required(self.args.required)
            .strategies(strategies)
            .build()
    }

    /// Resolve using `runner` for every external tool.
    pub fn run(&self, ui: &mut dyn UserInterface, runner: &dyn ToolRunner) -> Result<CommandResult> {
        let request = self.request();
        let identity = toolchain::identity_for(
            &self.config,
            &self.env,
            runner,
            self.args.compiler_id.as_deref(),
        )?;
        let ctx = toolchain::probe_context(&self.config, runner);

        let result = resolve_dependency(&request, identity.as_ref(), &self.env, &ctx);

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&result).map_err(|e| ExtdepError::Other(e.into()))?;
            ui.message(&json);
        } else {
            display::show_resolution(ui, &result);
        }

        if result.is_found() || !request.required() {
            return Ok(CommandResult::success());
        }

        if !self.args.json {
            if let Err(e) = result.require() {
                ui.error(&e.to_string());
            }
            if ui.output_mode().shows_decoration() {
                ui.show_hint(&hints::after_not_found(request.name()));
            }
        }
        Ok(CommandResult::failure(1))
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run(ui, &SystemRunner::new())
    }
}
