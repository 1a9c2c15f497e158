//! Registry lookup through pkg-config.

use super::probe::{split_flags, FoundDependency, NotFoundReason, ProbeContext};
use super::request::{LinkMode, Strategy};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Query pkg-config for `package`.
pub fn lookup(
    ctx: &ProbeContext<'_>,
    package: &str,
    link_mode: LinkMode,
) -> Result<FoundDependency, NotFoundReason> {
    let tool = ctx.pkg_config.as_str();

    let modversion = ctx.run_tool(tool, &args(&["--modversion", package]))?;
    if !modversion.success {
        return Err(NotFoundReason::Incompatible {
            detail: format!("package '{}' not found", package),
        });
    }
    let version = match modversion.stdout.trim() {
        "" => "unknown".to_string(),
        v => v.to_string(),
    };

    let cflags = ctx.run_tool(tool, &args(&["--cflags", package]))?;
    if !cflags.success {
        return Err(NotFoundReason::Incompatible {
            detail: format!("could not read compile flags for '{}'", package),
        });
    }

    let libs_args = match link_mode {
        LinkMode::Static => args(&["--static", "--libs", package]),
        LinkMode::Shared => args(&["--libs", package]),
    };
    let libs = ctx.run_tool(tool, &libs_args)?;
    if !libs.success {
        return Err(NotFoundReason::Incompatible {
            detail: format!("could not read link flags for '{}'", package),
        });
    }

    Ok(FoundDependency {
        compile_args: split_flags(&cflags.stdout),
        link_args: split_flags(&libs.stdout),
        version,
        source: Strategy::Registry,
    })
}
