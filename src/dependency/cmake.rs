//! Build-config lookup through `cmake --find-package`.

use crate::compiler::{CompilerId, Language};

use super::probe::{split_flags, FoundDependency, NotFoundReason, ProbeContext};
use super::request::Strategy;

/// CMake's name for `language`.
pub fn cmake_language(language: Language) -> &'static str {
    match language {
        Language::C => "C",
        Language::Cpp => "CXX",
        Language::Fortran => "Fortran",
    }
}

fn find_package_args(
    package: &str,
    modules: &[String],
    compiler: Option<CompilerId>,
    language: Language,
    mode: &str,
) -> Vec<String> {
    let compiler_id = compiler.map(|c| c.cmake_id()).unwrap_or("GNU");
    let mut args = vec![
        "--find-package".to_string(),
        format!("-DNAME={}", package),
        format!("-DCOMPILER_ID={}", compiler_id),
        format!("-DLANGUAGE={}", cmake_language(language)),
        format!("-DMODE={}", mode),
    ];
    if !modules.is_empty() {
        args.push(format!("-DMODULES={}", modules.join(";")));
    }
    args
}

/// Ask CMake whether `package` exists and which flags it needs.
///
/// Non-empty `modules` restricts the flags to those imported targets.
pub fn lookup(
    ctx: &ProbeContext<'_>,
    package: &str,
    modules: &[String],
    compiler: Option<CompilerId>,
    language: Language,
) -> Result<FoundDependency, NotFoundReason> {
    let tool = ctx.cmake.as_str();
    let args = |mode| find_package_args(package, modules, compiler, language, mode);

    let exist = ctx.run_tool(tool, &args("EXIST"))?;
    if !exist.success || exist.combined_output().to_lowercase().contains("not found") {
        return Err(NotFoundReason::Incompatible {
            detail: format!("CMake package '{}' not found", package),
        });
    }

    let compile = ctx.run_tool(tool, &args("COMPILE"))?;
    if !compile.success {
        return Err(NotFoundReason::Incompatible {
            detail: format!("CMake could not report compile flags for '{}'", package),
        });
    }

    let link = ctx.run_tool(tool, &args("LINK"))?;
    if !link.success {
        return Err(NotFoundReason::Incompatible {
            detail: format!("CMake could not report link flags for '{}'", package),
        });
    }

    Ok(FoundDependency {
        compile_args: split_flags(&compile.stdout),
        link_args: split_flags(&link.stdout),
        version: "unknown".to_string(),
        source: Strategy::BuildConfig,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    const EXIST: &str =
        "cmake --find-package -DNAME=LAPACK -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=EXIST";
    const COMPILE: &str =
        "cmake --find-package -DNAME=LAPACK -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=COMPILE";
    const LINK: &str =
        "cmake --find-package -DNAME=LAPACK -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=LINK";

    #[test]
    fn found_package_reports_flags() {
        let runner = MockRunner::new()
            .on_success(EXIST, "LAPACK found.\n")
            .on_success(COMPILE, "\n")
            .on_success(LINK, "/usr/lib/liblapack.so /usr/lib/libblas.so\n");
        let ctx = ProbeContext::new(&runner);

        let found = lookup(&ctx, "LAPACK", &[], Some(CompilerId::Gcc), Language::Fortran).unwrap();

        assert_eq!(found.version, "unknown");
        assert_eq!(found.source, Strategy::BuildConfig);
        assert!(found.compile_args.is_empty());
        assert_eq!(
            found.link_args,
            vec!["/usr/lib/liblapack.so", "/usr/lib/libblas.so"]
        );
    }

    #[test]
    fn not_found_message_is_incompatible() {
        let runner = MockRunner::new().on_success(EXIST, "LAPACK not found.\n");
        let ctx = ProbeContext::new(&runner);

        let reason = lookup(&ctx, "LAPACK", &[], None, Language::Fortran).unwrap_err();

        assert!(matches!(reason, NotFoundReason::Incompatible { .. }));
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn compiler_id_is_passed_to_cmake() {
        let runner = MockRunner::new();
        let ctx = ProbeContext::new(&runner);

        let _ = lookup(&ctx, "OpenCoarrays", &[], Some(CompilerId::Intel), Language::Fortran);

        assert!(runner.was_called(
            "cmake --find-package -DNAME=OpenCoarrays -DCOMPILER_ID=Intel -DLANGUAGE=Fortran"
        ));
    }

    #[test]
    fn missing_cmake_is_unavailable() {
        let runner = MockRunner::new().without_program("cmake");
        let ctx = ProbeContext::new(&runner);

        let reason = lookup(&ctx, "LAPACK", &[], None, Language::C).unwrap_err();

        assert_eq!(reason, NotFoundReason::Unavailable { tool: "cmake".into() });
    }

    #[test]
    fn modules_are_passed_to_every_mode() {
        let runner = MockRunner::new()
            .on_success(
                "cmake --find-package -DNAME=OpenCoarrays -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=EXIST -DMODULES=OpenCoarrays::caf_mpi",
                "OpenCoarrays found.\n",
            )
            .on_success(
                "cmake --find-package -DNAME=OpenCoarrays -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=COMPILE -DMODULES=OpenCoarrays::caf_mpi",
                "-fcoarray=lib\n",
            )
            .on_success(
                "cmake --find-package -DNAME=OpenCoarrays -DCOMPILER_ID=GNU -DLANGUAGE=Fortran -DMODE=LINK -DMODULES=OpenCoarrays::caf_mpi",
                "/usr/lib/libcaf_mpi.so\n",
            );
        let ctx = ProbeContext::new(&runner);
        let modules = vec!["OpenCoarrays::caf_mpi".to_string()];

        let found = lookup(&ctx, "OpenCoarrays", &modules, Some(CompilerId::Gcc), Language::Fortran)
            .unwrap();

        assert_eq!(found.compile_args, vec!["-fcoarray=lib"]);
        assert_eq!(found.link_args, vec!["/usr/lib/libcaf_mpi.so"]);
        assert_eq!(runner.call_count(), 3);
    }

    #[test]
    fn no_modules_adds_no_argument() {
        let args = find_package_args("LAPACK", &[], None, Language::C, "LINK");
        assert!(!args.iter().any(|a| a.starts_with("-DMODULES")));
    }

    #[test]
    fn language_names() {
        assert_eq!(cmake_language(Language::Cpp), "CXX");
        assert_eq!(cmake_language(Language::Fortran), "Fortran");
    }
}
