//! Probes: one detection strategy each.

use std::fmt;

use serde::Serialize;

use crate::compiler::CompilerId;
use crate::error::ExtdepError;
use crate::shell::{render_command, CommandResult, ToolRunner};

use super::request::{ResolutionRequest, Strategy};
use super::{cmake, pkgconfig};

/// Flags and version reported by a successful probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundDependency {
    pub compile_args: Vec<String>,
    pub link_args: Vec<String>,
    /// Reported version, or `"unknown"`.
    pub version: String,
    pub source: Strategy,
}

/// Why a probe did not find the dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NotFoundReason {
    /// The detection tool could not be run.
    Unavailable { tool: String },
    /// The tool ran and reported no usable match.
    Incompatible { detail: String },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::Unavailable { tool } => write!(f, "{} is not available", tool),
            NotFoundReason::Incompatible { detail } => f.write_str(detail),
        }
    }
}

/// Outcome of one probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found(FoundDependency),
    NotFound {
        strategy: Strategy,
        target: String,
        reason: NotFoundReason,
    },
}

/// Tools and runner shared by every probe of one resolution.
pub struct ProbeContext<'a> {
    pub runner: &'a dyn ToolRunner,
    /// pkg-config executable.
    pub pkg_config: String,
    /// CMake executable.
    pub cmake: String,
}

impl<'a> ProbeContext<'a> {
    /// Context using `pkg-config` and `cmake` from PATH.
    pub fn new(runner: &'a dyn ToolRunner) -> Self {
        Self {
            runner,
            pkg_config: "pkg-config".to_string(),
            cmake: "cmake".to_string(),
        }
    }

    /// Use other tool executables.
    pub fn with_tools(mut self, pkg_config: impl Into<String>, cmake: impl Into<String>) -> Self {
        self.pkg_config = pkg_config.into();
        self.cmake = cmake.into();
        self
    }

    /// Run a tool, classifying spawn failures as a [`NotFoundReason`].
    pub(crate) fn run_tool(
        &self,
        program: &str,
        args: &[String],
    ) -> std::result::Result<CommandResult, NotFoundReason> {
        tracing::debug!("Running {}", render_command(program, args));
        match self.runner.run(program, args) {
            Ok(result) => Ok(result),
            Err(ExtdepError::ToolNotFound { program }) => {
                Err(NotFoundReason::Unavailable { tool: program })
            }
            Err(e) => Err(NotFoundReason::Incompatible {
                detail: e.to_string(),
            }),
        }
    }
}

/// A single detection strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// pkg-config lookup of one package.
    RegistryLookup {
        package: String,
        /// Package name came from an environment override.
        from_override: bool,
    },
    /// CMake `find_package` lookup.
    BuildConfigLookup {
        package: String,
        /// Imported targets to link instead of the package's default set.
        modules: Vec<String>,
        compiler: Option<CompilerId>,
    },
    /// Flags the compiler understands natively.
    IntrinsicVendorSupport {
        compiler: CompilerId,
        compile_args: Vec<String>,
        link_args: Vec<String>,
    },
}

impl Probe {
    pub fn strategy(&self) -> Strategy {
        match self {
            Probe::RegistryLookup { .. } => Strategy::Registry,
            Probe::BuildConfigLookup { .. } => Strategy::BuildConfig,
            Probe::IntrinsicVendorSupport { .. } => Strategy::Intrinsic,
        }
    }

    /// What the probe looks at, for diagnostics.
    pub fn target(&self) -> String {
        match self {
            Probe::RegistryLookup { package, .. } => format!("pkg-config:{}", package),
            Probe::BuildConfigLookup { package, .. } => format!("cmake:{}", package),
            Probe::IntrinsicVendorSupport { compiler, .. } => format!("compiler:{}", compiler),
        }
    }

    /// Whether this is a registry probe selected by an environment override.
    pub fn from_override(&self) -> bool {
        matches!(
            self,
            Probe::RegistryLookup {
                from_override: true,
                ..
            }
        )
    }

    /// Run the probe. Never fails; every problem becomes `NotFound`.
    pub fn attempt(&self, request: &ResolutionRequest, ctx: &ProbeContext<'_>) -> ProbeOutcome {
        let result = match self {
            Probe::RegistryLookup { package, .. } => {
                pkgconfig::lookup(ctx, package, request.link_mode())
            }
            Probe::BuildConfigLookup {
                package,
                modules,
                compiler,
            } => cmake::lookup(ctx, package, modules, *compiler, request.language()),
            Probe::IntrinsicVendorSupport {
                compile_args,
                link_args,
                ..
            } => Ok(FoundDependency {
                compile_args: compile_args.clone(),
                link_args: link_args.clone(),
                version: "unknown".to_string(),
                source: Strategy::Intrinsic,
            }),
        };

        match result {
            Ok(found) => ProbeOutcome::Found(found),
            Err(reason) => ProbeOutcome::NotFound {
                strategy: self.strategy(),
                target: self.target(),
                reason,
            },
        }
    }
}

/// Split tool output into flags, in order.
pub(crate) fn split_flags(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}
