//! Resolver: runs candidates in order and commits the first success.

use crate::compiler::CompilerIdentity;

use super::candidates::{self, CandidatePlan};
use super::overrides::EnvOverrides;
use super::patch;
use super::probe::{ProbeContext, ProbeOutcome};
use super::request::ResolutionRequest;
use super::result::{ProbeFailure, ResolutionResult};

/// Executes candidate plans against one probe context.
pub struct Resolver<'a> {
    ctx: &'a ProbeContext<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(ctx: &'a ProbeContext<'a>) -> Self {
        Self { ctx }
    }

    /// Try each probe of `plan` in order, stopping at the first success.
    pub fn resolve(&self, request: &ResolutionRequest, plan: &CandidatePlan) -> ResolutionResult {
        let mut failures = Vec::new();

        for probe in &plan.probes {
            tracing::debug!(
                "Trying {} for '{}' ({})",
                probe.strategy(),
                request.name(),
                probe.target()
            );

            match probe.attempt(request, self.ctx) {
                ProbeOutcome::Found(found) => {
                    let found = patch::apply(found, probe, plan.overridden.as_ref(), plan.compiler);
                    tracing::info!(
                        "Found '{}' {} via {}",
                        request.name(),
                        found.version,
                        found.source
                    );
                    return ResolutionResult::found(request.name(), found, failures);
                }
                ProbeOutcome::NotFound {
                    strategy,
                    target,
                    reason,
                } => {
                    tracing::debug!("{} did not find '{}': {}", target, request.name(), reason);
                    failures.push(ProbeFailure {
                        strategy,
                        target,
                        reason,
                    });
                }
            }
        }

        tracing::debug!(
            "'{}' not found after {} candidate(s)",
            request.name(),
            failures.len()
        );
        ResolutionResult::not_found(request.name(), failures)
    }
}

/// Identify the compiler, build candidates and resolve.
///
/// A compiler that cannot be identified is not an error: resolution goes
/// ahead with no compiler id.
pub fn resolve_dependency(
    request: &ResolutionRequest,
    identity: &dyn CompilerIdentity,
    overrides: &EnvOverrides,
    ctx: &ProbeContext<'_>,
) -> ResolutionResult {
    let compiler = match identity.identify(request.language()) {
        Ok(info) => Some(info.id),
        Err(e) => {
            tracing::debug!("Continuing without compiler identity: {}", e);
            None
        }
    };

    let plan = candidates::build(request, compiler, overrides);
    Resolver::new(ctx).resolve(request, &plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompilerId, DetectedIdentity, FixedIdentity, Language};
    use crate::dependency::request::{LinkMode, Strategy};
    use crate::shell::MockRunner;
    use tempfile::TempDir;

    #[test]
    fn lapack_from_registry_on_gcc() {
        let runner = MockRunner::new()
            .on_success("pkg-config --modversion lapack", "3.9.0\n")
            .on_success("pkg-config --cflags lapack", "\n")
            .on_success("pkg-config --libs lapack", "-llapack -lblas\n");
        let ctx = ProbeContext::new(&runner);
        let request = ResolutionRequest::builder("lapack")
            .language(Language::Fortran)
            .build();

        let result = resolve_dependency(
            &request,
            &FixedIdentity::new(CompilerId::Gcc),
            &EnvOverrides::new(),
            &ctx,
        );

        assert!(result.is_found());
        assert_eq!(result.version(), Some("3.9.0"));
        assert_eq!(result.source(), Some(Strategy::Registry));
        assert_eq!(result.link_args(), &["-llapack", "-lblas"]);
        assert!(!runner.was_called("cmake"));
    }

    #[test]
    fn mkl_on_gcc_is_patched() {
        let temp = TempDir::new().unwrap();
        let mkl = temp
            .path()
            .join("compilers_and_libraries_2020.1.217")
            .join("linux")
            .join("mkl");
        std::fs::create_dir_all(&mkl).unwrap();

        let runner = MockRunner::new()
            .on_success("pkg-config --modversion mkl-static-lp64-iomp", "\n")
            .on_success("pkg-config --cflags mkl-static-lp64-iomp", "-I/mkl/include\n")
            .on_success(
                "pkg-config --static --libs mkl-static-lp64-iomp",
                "-L/mkl/lib -lmkl_intel_lp64 -lmkl_intel_thread -lmkl_core -liomp5\n",
            );
        let ctx = ProbeContext::new(&runner);
        let env = EnvOverrides::from_vars([("MKLROOT", mkl.display().to_string())]);
        let request = ResolutionRequest::builder("lapack")
            .language(Language::Fortran)
            .link_mode(LinkMode::Static)
            .build();

        let result = resolve_dependency(&request, &FixedIdentity::new(CompilerId::Gcc), &env, &ctx);

        assert!(result.is_found());
        assert_eq!(result.version(), Some("2020.1.217"));
        assert_eq!(
            result.link_args(),
            &[
                "-L/mkl/lib",
                "-lmkl_gf_lp64",
                "-lmkl_intel_thread",
                "-lmkl_core",
                "-liomp5"
            ]
        );
        assert_eq!(result.compile_args(), &["-I/mkl/include"]);
    }

    #[test]
    fn cmake_hit_keeps_its_own_version_under_mklroot() {
        let temp = TempDir::new().unwrap();
        let mkl = temp
            .path()
            .join("compilers_and_libraries_2020.1.217")
            .join("linux")
            .join("mkl");
        std::fs::create_dir_all(&mkl).unwrap();

        let runner = MockRunner::new()
            .on_success(
                "cmake --find-package -DNAME=LAPACK -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=EXIST",
                "LAPACK found.\n",
            )
            .on_success(
                "cmake --find-package -DNAME=LAPACK -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=COMPILE",
                "\n",
            )
            .on_success(
                "cmake --find-package -DNAME=LAPACK -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=LINK",
                "/usr/lib/liblapack.so\n",
            );
        let ctx = ProbeContext::new(&runner);
        let env = EnvOverrides::from_vars([("MKLROOT", mkl.display().to_string())]);
        let request = ResolutionRequest::builder("lapack")
            .language(Language::Fortran)
            .link_mode(LinkMode::Static)
            .build();

        let result = resolve_dependency(&request, &FixedIdentity::new(CompilerId::Gcc), &env, &ctx);

        assert!(runner.was_called("pkg-config --modversion mkl-static-lp64-iomp"));
        assert!(result.is_found());
        assert_eq!(result.source(), Some(Strategy::BuildConfig));
        assert_eq!(result.version(), Some("unknown"));
        assert_eq!(result.link_args(), &["/usr/lib/liblapack.so"]);
    }

    #[test]
    fn build_config_only_not_found() {
        let runner = MockRunner::new().on_success(
            "cmake --find-package -DNAME=LAPACK -DCOMPILER_ID=GNU -DLANGUAGE=C -DMODE=EXIST",
            "LAPACK not found.\n",
        );
        let ctx = ProbeContext::new(&runner);
        let request = ResolutionRequest::builder("lapack")
            .strategies([Strategy::BuildConfig])
            .build();

        let result = resolve_dependency(
            &request,
            &FixedIdentity::new(CompilerId::Gcc),
            &EnvOverrides::new(),
            &ctx,
        );

        assert!(!result.is_found());
        assert_eq!(result.attempted(), &[Strategy::BuildConfig]);
        assert!(result.link_args().is_empty());
        assert!(result.compile_args().is_empty());
        assert!(!runner.was_called("pkg-config"));
    }

    #[test]
    fn coarray_on_intel_spawns_nothing() {
        let runner = MockRunner::new();
        let ctx = ProbeContext::new(&runner);
        let request = ResolutionRequest::builder("coarray")
            .language(Language::Fortran)
            .build();

        let result = resolve_dependency(
            &request,
            &FixedIdentity::new(CompilerId::Intel),
            &EnvOverrides::new(),
            &ctx,
        );

        assert!(result.is_found());
        assert_eq!(result.version(), Some("unknown"));
        assert_eq!(result.compile_args(), &["-coarray=shared"]);
        assert_eq!(result.link_args(), &["-coarray=shared"]);
        assert_eq!(result.source(), Some(Strategy::Intrinsic));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn empty_strategies_invoke_nothing() {
        let runner = MockRunner::new();
        let ctx = ProbeContext::new(&runner);
        let request = ResolutionRequest::builder("lapack")
            .strategies(Vec::<Strategy>::new())
            .build();

        let result = resolve_dependency(
            &request,
            &FixedIdentity::new(CompilerId::Gcc),
            &EnvOverrides::new(),
            &ctx,
        );

        assert!(!result.is_found());
        assert!(result.attempted().is_empty());
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn falls_through_to_next_candidate() {
        let runner = MockRunner::new()
            .on_success("pkg-config --modversion caf", "2.9.2\n")
            .on_success("pkg-config --cflags caf", "\n")
            .on_success("pkg-config --libs caf", "-lcaf_mpi\n");
        let ctx = ProbeContext::new(&runner);
        let request = ResolutionRequest::builder("coarray")
            .language(Language::Fortran)
            .build();

        let result = resolve_dependency(
            &request,
            &FixedIdentity::new(CompilerId::Gcc),
            &EnvOverrides::new(),
            &ctx,
        );

        assert!(result.is_found());
        assert_eq!(result.attempted(), &[Strategy::Registry, Strategy::Registry]);
        assert_eq!(result.failures()[0].target, "pkg-config:caf-openmpi");
        assert_eq!(result.link_args(), &["-lcaf_mpi"]);
    }

    #[test]
    fn unidentified_compiler_still_resolves() {
        let runner = MockRunner::new()
            .without_program("gfortran")
            .on_success("pkg-config --modversion lapack", "3.10.1\n")
            .on_success("pkg-config --cflags lapack", "\n")
            .on_success("pkg-config --libs lapack", "-llapack\n");
        let ctx = ProbeContext::new(&runner);
        let identity = DetectedIdentity::new(&runner);
        let request = ResolutionRequest::builder("lapack")
            .language(Language::Fortran)
            .build();

        let result = resolve_dependency(&request, &identity, &EnvOverrides::new(), &ctx);

        assert!(result.is_found());
        assert_eq!(result.version(), Some("3.10.1"));
    }

    #[test]
    fn missing_tools_exhaust_candidates() {
        let runner = MockRunner::new()
            .without_program("pkg-config")
            .without_program("cmake");
        let ctx = ProbeContext::new(&runner);
        let request = ResolutionRequest::builder("zlib").required(true).build();

        let result = resolve_dependency(
            &request,
            &FixedIdentity::new(CompilerId::Clang),
            &EnvOverrides::new(),
            &ctx,
        );

        assert!(!result.is_found());
        assert_eq!(
            result.attempted(),
            &[Strategy::Registry, Strategy::BuildConfig]
        );
        assert!(result.require().is_err());
    }
}
