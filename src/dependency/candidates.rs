//! Candidate builder: turns a request into an ordered probe sequence.

use std::path::PathBuf;

use crate::compiler::CompilerId;

use super::family::{DependencyFamily, OverrideSpec};
use super::overrides::EnvOverrides;
use super::probe::Probe;
use super::request::{ResolutionRequest, Strategy};

/// An environment override that shaped the candidate sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideContext {
    /// Resolved override path.
    pub path: PathBuf,
    pub spec: &'static OverrideSpec,
}

/// Ordered probes for one request, plus what patching needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePlan {
    pub probes: Vec<Probe>,
    /// Override recorded for post-success patching.
    pub overridden: Option<OverrideContext>,
    /// Compiler the plan was built for, when it could be identified.
    pub compiler: Option<CompilerId>,
}

impl CandidatePlan {
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

/// Build the candidate sequence for `request`.
///
/// A compiler with native support yields only the intrinsic probe (or
/// nothing, if `intrinsic` is not permitted); external tools are never
/// consulted for it.
pub fn build(
    request: &ResolutionRequest,
    compiler: Option<CompilerId>,
    overrides: &EnvOverrides,
) -> CandidatePlan {
    let family = DependencyFamily::for_name(request.name());

    if let Some(id) = compiler {
        if let Some((compile_args, link_args)) = family.intrinsic_args(id) {
            let probes = if request.permits(Strategy::Intrinsic) {
                vec![Probe::IntrinsicVendorSupport {
                    compiler: id,
                    compile_args,
                    link_args,
                }]
            } else {
                tracing::debug!(
                    "{} supports {} natively but intrinsic lookup is not permitted",
                    id,
                    family.name()
                );
                Vec::new()
            };
            return CandidatePlan {
                probes,
                overridden: None,
                compiler,
            };
        }
    }

    let overridden = family.override_spec().and_then(|spec| {
        overrides.path(spec.variable).map(|path| {
            tracing::debug!("Using {}={}", spec.variable, path.display());
            OverrideContext { path, spec }
        })
    });

    let mut probes = Vec::new();
    if request.permits(Strategy::Registry) {
        match &overridden {
            Some(ctx) => probes.push(Probe::RegistryLookup {
                package: ctx.spec.package_for(request.link_mode()).to_string(),
                from_override: true,
            }),
            None => {
                for package in family.registry_packages(request.language()) {
                    probes.push(Probe::RegistryLookup {
                        package,
                        from_override: false,
                    });
                }
            }
        }
    }
    if request.permits(Strategy::BuildConfig) {
        probes.push(Probe::BuildConfigLookup {
            package: family.build_config_package(),
            modules: family.build_config_modules(),
            compiler,
        });
    }

    CandidatePlan {
        probes,
        overridden,
        compiler,
    }
}
