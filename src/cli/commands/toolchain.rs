//! Wiring shared by commands that run external tools.

use crate::compiler::{CompilerId, CompilerIdentity, DetectedIdentity, FixedIdentity, Language};
use crate::config::ExtdepConfig;
use crate::dependency::{EnvOverrides, ProbeContext};
use crate::error::Result;
use crate::shell::ToolRunner;

/// Identity service for the configured compilers, with `CC`/`CXX`/`FC` applied.
pub fn detected_identity<'a>(
    config: &ExtdepConfig,
    env: &EnvOverrides,
    runner: &'a dyn ToolRunner,
) -> DetectedIdentity<'a> {
    let mut identity = DetectedIdentity::new(runner);
    for language in [Language::C, Language::Cpp, Language::Fortran] {
        if let Some(exe) = config.compilers.for_language(language) {
            identity = identity.with_compiler(language, exe);
        }
    }
    identity.with_env(env)
}

/// Fixed identity from a `--compiler-id` value.
pub fn fixed_identity(id: &str) -> Result<FixedIdentity> {
    Ok(FixedIdentity::new(CompilerId::parse(id)?))
}

/// Identity service: fixed when `compiler_id` is given, detected otherwise.
pub fn identity_for<'a>(
    config: &ExtdepConfig,
    env: &EnvOverrides,
    runner: &'a dyn ToolRunner,
    compiler_id: Option<&str>,
) -> Result<Box<dyn CompilerIdentity + 'a>> {
    match compiler_id {
        Some(id) => Ok(Box::new(fixed_identity(id)?)),
        None => Ok(Box::new(detected_identity(config, env, runner))),
    }
}

/// Probe context using the configured tool executables.
pub fn probe_context<'a>(config: &ExtdepConfig, runner: &'a dyn ToolRunner) -> ProbeContext<'a> {
    ProbeContext::new(runner).with_tools(&config.settings.pkg_config, &config.settings.cmake)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    #[test]
    fn configured_compiler_is_used() {
        let mut config = ExtdepConfig::default();
        config.compilers.fortran = Some("ifort".to_string());
        let runner = MockRunner::new();

        let identity = detected_identity(&config, &EnvOverrides::new(), &runner);

        assert_eq!(identity.compiler_for(Language::Fortran), "ifort");
        assert_eq!(identity.compiler_for(Language::C), "cc");
    }

    #[test]
    fn environment_beats_config() {
        let mut config = ExtdepConfig::default();
        config.compilers.fortran = Some("ifort".to_string());
        let runner = MockRunner::new();
        let env = EnvOverrides::from_vars([("FC", "flang")]);

        let identity = detected_identity(&config, &env, &runner);

        assert_eq!(identity.compiler_for(Language::Fortran), "flang");
    }

    #[test]
    fn unknown_compiler_id_is_rejected() {
        let config = ExtdepConfig::default();
        let runner = MockRunner::new();
        let result = identity_for(&config, &EnvOverrides::new(), &runner, Some("turbo-c"));
        assert!(result.is_err());
    }

    #[test]
    fn fixed_identity_reports_id() {
        let config = ExtdepConfig::default();
        let runner = MockRunner::new();
        let identity =
            identity_for(&config, &EnvOverrides::new(), &runner, Some("intel")).unwrap();
        let info = identity.identify(Language::Fortran).unwrap();
        assert_eq!(info.id, CompilerId::Intel);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn probe_context_uses_configured_tools() {
        let mut config = ExtdepConfig::default();
        config.settings.pkg_config = "pkgconf".to_string();
        let runner = MockRunner::new();
        let ctx = probe_context(&config, &runner);
        assert_eq!(ctx.pkg_config, "pkgconf");
        assert_eq!(ctx.cmake, "cmake");
    }
}
