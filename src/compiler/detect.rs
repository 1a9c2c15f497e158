//! Compiler identification from `--version` banners.

use std::collections::HashMap;
use std::path::Path;

use crate::dependency::EnvOverrides;
use crate::error::{ExtdepError, Result};
use crate::shell::{parse_system_path, resolve_tool_path, ToolRunner};

use super::identity::{CompilerId, CompilerIdentity, CompilerInfo, Language};
use super::version::extract_version;

/// Identity service that runs the configured compiler and reads its banner.
pub struct DetectedIdentity<'a> {
    runner: &'a dyn ToolRunner,
    compilers: HashMap<Language, String>,
}

impl<'a> DetectedIdentity<'a> {
    /// Use the default compiler executable for every language.
    pub fn new(runner: &'a dyn ToolRunner) -> Self {
        Self {
            runner,
            compilers: HashMap::new(),
        }
    }

    /// Use `executable` for `language`.
    pub fn with_compiler(mut self, language: Language, executable: impl Into<String>) -> Self {
        self.compilers.insert(language, executable.into());
        self
    }

    /// Take `CC`/`CXX`/`FC` from the override snapshot, where set.
    ///
    /// Applied after configured compilers, so the environment wins.
    pub fn with_env(mut self, overrides: &EnvOverrides) -> Self {
        for language in [Language::C, Language::Cpp, Language::Fortran] {
            if let Some(exe) = overrides.get(language.compiler_env_var()) {
                if !exe.trim().is_empty() {
                    self.compilers.insert(language, exe.trim().to_string());
                }
            }
        }
        self
    }

    /// The compiler command line that will be run for `language`.
    pub fn compiler_for(&self, language: Language) -> &str {
        self.compilers
            .get(&language)
            .map(String::as_str)
            .unwrap_or_else(|| language.default_compiler())
    }
}

impl CompilerIdentity for DetectedIdentity<'_> {
    fn identify(&self, language: Language) -> Result<CompilerInfo> {
        let command = self.compiler_for(language);
        // CC="ccache gcc" style launchers: the last word is the compiler.
        let mut words: Vec<&str> = command.split_whitespace().collect();
        let Some(program) = words.first().copied() else {
            return Err(ExtdepError::CompilerDetectionFailed {
                language: language.to_string(),
                message: "empty compiler command".to_string(),
            });
        };
        let mut args: Vec<String> = words.drain(1..).map(str::to_string).collect();
        args.push("--version".to_string());

        let output = self.runner.run(program, &args).map_err(|e| match e {
            ExtdepError::ToolNotFound { program } => ExtdepError::CompilerDetectionFailed {
                language: language.to_string(),
                message: format!("'{}' not found", program),
            },
            other => other,
        })?;

        let banner = output.combined_output();
        let compiler_name = command.split_whitespace().last().unwrap_or(program);
        let id = classify(compiler_name, &banner).ok_or_else(|| {
            ExtdepError::CompilerDetectionFailed {
                language: language.to_string(),
                message: format!(
                    "unrecognized output from '{} --version': {}",
                    command,
                    banner.lines().next().unwrap_or("").trim()
                ),
            }
        })?;

        let version = extract_version(&banner).unwrap_or_else(|| "unknown".to_string());
        tracing::debug!("{} compiler '{}' identified as {} {}", language, command, id, version);

        Ok(CompilerInfo {
            id,
            version,
            language,
            path: resolve_tool_path(compiler_name, &parse_system_path()),
        })
    }
}

/// Classify a compiler from its executable name and `--version` output.
pub fn classify(executable: &str, banner: &str) -> Option<CompilerId> {
    let stem = Path::new(executable)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    // MSVC-style drivers print the same banner as their GNU-style siblings.
    match stem.as_str() {
        "icl" | "icx-cl" => return Some(CompilerId::IntelCl),
        "clang-cl" => return Some(CompilerId::ClangCl),
        _ => {}
    }

    let lower = banner.to_lowercase();

    if lower.contains("apple clang") || lower.contains("apple llvm") {
        Some(CompilerId::AppleClang)
    } else if lower.contains("emscripten") {
        Some(CompilerId::Emscripten)
    } else if lower.contains("armclang") || lower.contains("arm compiler for") {
        Some(CompilerId::Armclang)
    } else if lower.contains("arm compiler") || lower.contains("armcc") {
        Some(CompilerId::Arm)
    } else if banner.contains("Microsoft (R)") {
        Some(CompilerId::Msvc)
    } else if lower.contains("clang") {
        Some(CompilerId::Clang)
    } else if banner.contains("Intel(R)")
        || banner.contains("(ICC)")
        || banner.contains("(IFORT)")
        || banner.contains("(IFX)")
    {
        Some(CompilerId::Intel)
    } else if banner.contains("PGI") || lower.contains("pgfortran") || lower.contains("pgcc") {
        Some(CompilerId::Pgi)
    } else if lower.contains("lcc:") || banner.contains("MCST") {
        Some(CompilerId::Elbrus)
    } else if banner.contains("RX Family") {
        Some(CompilerId::Ccrx)
    } else if banner.contains("Free Software Foundation")
        || banner.contains("GNU Fortran")
        || lower.starts_with("gcc")
        || lower.starts_with("cc (")
    {
        Some(CompilerId::Gcc)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    const GCC_BANNER: &str = "gcc (Ubuntu 9.4.0-1ubuntu1~20.04.2) 9.4.0\n\
Copyright (C) 2019 Free Software Foundation, Inc.\n";
    const GFORTRAN_BANNER: &str = "GNU Fortran (GCC) 10.2.1 20210130\n";
    const IFORT_BANNER: &str = "ifort (IFORT) 19.1.0.166 20191121\n\
Copyright (C) 1985-2019 Intel Corporation.  All rights reserved.\n";

    #[test]
    fn classify_known_banners() {
        assert_eq!(classify("gcc", GCC_BANNER), Some(CompilerId::Gcc));
        assert_eq!(classify("gfortran", GFORTRAN_BANNER), Some(CompilerId::Gcc));
        assert_eq!(classify("ifort", IFORT_BANNER), Some(CompilerId::Intel));
        assert_eq!(
            classify("cc", "Apple clang version 14.0.0 (clang-1400.0.29.202)"),
            Some(CompilerId::AppleClang)
        );
        assert_eq!(
            classify("clang", "Ubuntu clang version 14.0.0-1ubuntu1"),
            Some(CompilerId::Clang)
        );
        assert_eq!(
            classify("pgfortran", "pgfortran 19.10-0 LLVM 64-bit target on x86-64 Linux"),
            Some(CompilerId::Pgi)
        );
        assert_eq!(
            classify("lcc", "lcc:1.23.12:Jun-05-2019:e2k-v4-linux"),
            Some(CompilerId::Elbrus)
        );
    }

    #[test]
    fn classify_uses_executable_for_msvc_style_drivers() {
        assert_eq!(
            classify("clang-cl.exe", "clang version 12.0.0"),
            Some(CompilerId::ClangCl)
        );
        assert_eq!(classify("icl", ""), Some(CompilerId::IntelCl));
    }

    #[test]
    fn classify_unknown_banner() {
        assert_eq!(classify("tcc", "tcc version 0.9.27"), None);
    }

    #[test]
    fn detected_identity_runs_version_query() {
        let runner = MockRunner::new().on_success("gfortran --version", GFORTRAN_BANNER);
        let identity = DetectedIdentity::new(&runner);

        let info = identity.identify(Language::Fortran).unwrap();

        assert_eq!(info.id, CompilerId::Gcc);
        assert_eq!(info.version, "10.2.1");
        assert_eq!(runner.calls(), vec!["gfortran --version".to_string()]);
    }

    #[test]
    fn env_override_selects_compiler() {
        let runner = MockRunner::new().on_success("ifort --version", IFORT_BANNER);
        let overrides = EnvOverrides::from_vars([("FC", "ifort")]);
        let identity = DetectedIdentity::new(&runner)
            .with_compiler(Language::Fortran, "gfortran")
            .with_env(&overrides);

        assert_eq!(identity.compiler_for(Language::Fortran), "ifort");
        let info = identity.identify(Language::Fortran).unwrap();
        assert_eq!(info.id, CompilerId::Intel);
    }

    #[test]
    fn launcher_prefix_is_kept_as_program() {
        let runner = MockRunner::new().on_success("ccache gcc --version", GCC_BANNER);
        let identity = DetectedIdentity::new(&runner).with_compiler(Language::C, "ccache gcc");

        let info = identity.identify(Language::C).unwrap();

        assert_eq!(info.id, CompilerId::Gcc);
        assert_eq!(runner.calls(), vec!["ccache gcc --version".to_string()]);
    }

    #[test]
    fn missing_compiler_is_detection_failure() {
        let runner = MockRunner::new().without_program("gfortran");
        let identity = DetectedIdentity::new(&runner);

        let err = identity.identify(Language::Fortran).unwrap_err();

        assert!(matches!(err, ExtdepError::CompilerDetectionFailed { .. }));
        assert!(err.to_string().contains("gfortran"));
    }

    #[test]
    fn unrecognized_banner_is_detection_failure() {
        let runner = MockRunner::new().on_success("cc --version", "tcc version 0.9.27");
        let identity = DetectedIdentity::new(&runner);

        let err = identity.identify(Language::C).unwrap_err();
        assert!(err.to_string().contains("unrecognized"));
    }
}
