//! Post-success patching of a committed result.
//!
//! Both patches only ever run on a probe that already succeeded and never
//! turn success into failure.

use std::path::Path;

use thiserror::Error;

use crate::compiler::CompilerId;

use super::candidates::OverrideContext;
use super::probe::{FoundDependency, Probe};

/// Override path that does not carry a recognizable version.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverridePathError {
    #[error("'{marker}' does not occur in {path}")]
    MarkerMissing { marker: String, path: String },

    #[error("no version follows '{marker}' in {path}")]
    EmptyVersion { marker: String, path: String },
}

#[cfg(windows)]
fn render_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(not(windows))]
fn render_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Version segment following `marker` in `path`, up to the next separator.
pub fn version_from_path(path: &Path, marker: &str) -> Result<String, OverridePathError> {
    let rendered = render_path(path);
    let start = rendered
        .find(marker)
        .ok_or_else(|| OverridePathError::MarkerMissing {
            marker: marker.to_string(),
            path: rendered.clone(),
        })?
        + marker.len();

    let version = rendered[start..].split('/').next().unwrap_or("");
    if version.is_empty() {
        return Err(OverridePathError::EmptyVersion {
            marker: marker.to_string(),
            path: rendered.clone(),
        });
    }
    Ok(version.to_string())
}

/// Fill an `"unknown"` version from the override path.
pub fn backfill_version(found: &mut FoundDependency, overridden: &OverrideContext) {
    if found.version != "unknown" {
        return;
    }
    match version_from_path(&overridden.path, overridden.spec.version_marker) {
        Ok(version) => {
            tracing::debug!("Version {} taken from {}", version, overridden.spec.variable);
            found.version = version;
        }
        Err(e) => tracing::debug!("Leaving version unknown: {}", e),
    }
}

/// Replace every occurrence of `expected` with `replacement` in each token.
///
/// Tokens without `expected` are returned untouched; order is preserved.
pub fn rewrite_vendor_tokens(link_args: &[String], expected: &str, replacement: &str) -> Vec<String> {
    link_args
        .iter()
        .map(|token| {
            if token.contains(expected) {
                token.replace(expected, replacement)
            } else {
                token.clone()
            }
        })
        .collect()
}

/// Apply every patch that fits the committed probe.
///
/// Only a hit from the override's own registry package is patched.
pub fn apply(
    mut found: FoundDependency,
    probe: &Probe,
    overridden: Option<&OverrideContext>,
    compiler: Option<CompilerId>,
) -> FoundDependency {
    let Some(overridden) = overridden.filter(|_| probe.from_override()) else {
        return found;
    };

    backfill_version(&mut found, overridden);

    let spec = overridden.spec;
    if let Some(vendor) = compiler {
        if vendor != spec.native_vendor {
            match spec.equivalent_token(vendor) {
                Some(replacement) => {
                    tracing::debug!(
                        "Rewriting {} to {} for {}",
                        spec.vendor_token,
                        replacement,
                        vendor
                    );
                    found.link_args =
                        rewrite_vendor_tokens(&found.link_args, spec.vendor_token, replacement);
                }
                None => tracing::debug!(
                    "No {} equivalent known for {}, link flags left as reported",
                    spec.vendor_token,
                    vendor
                ),
            }
        }
    }

    found
}
