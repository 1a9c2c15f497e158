//! Resolution results.

use serde::Serialize;

use crate::error::{ExtdepError, Result};

use super::probe::{FoundDependency, NotFoundReason};
use super::request::Strategy;

/// One probe that did not find the dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
    pub strategy: Strategy,
    pub target: String,
    pub reason: NotFoundReason,
}

/// Outcome of resolving one request.
///
/// Only constructed through [`ResolutionResult::found`] and
/// [`ResolutionResult::not_found`], so a missing dependency never carries
/// flags or a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    name: String,
    found: bool,
    compile_args: Vec<String>,
    link_args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Strategy>,
    attempted: Vec<Strategy>,
    failures: Vec<ProbeFailure>,
}

impl ResolutionResult {
    /// A committed success. `failures` are the probes tried before it.
    pub fn found(name: impl Into<String>, dep: FoundDependency, failures: Vec<ProbeFailure>) -> Self {
        let mut attempted: Vec<Strategy> = failures.iter().map(|f| f.strategy).collect();
        attempted.push(dep.source);
        Self {
            name: name.into(),
            found: true,
            compile_args: dep.compile_args,
            link_args: dep.link_args,
            version: Some(dep.version),
            source: Some(dep.source),
            attempted,
            failures,
        }
    }

    /// Every candidate was exhausted.
    pub fn not_found(name: impl Into<String>, failures: Vec<ProbeFailure>) -> Self {
        Self {
            name: name.into(),
            found: false,
            compile_args: Vec::new(),
            link_args: Vec::new(),
            version: None,
            source: None,
            attempted: failures.iter().map(|f| f.strategy).collect(),
            failures,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn compile_args(&self) -> &[String] {
        &self.compile_args
    }

    pub fn link_args(&self) -> &[String] {
        &self.link_args
    }

    /// Version, or `"unknown"`. `None` when not found.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn source(&self) -> Option<Strategy> {
        self.source
    }

    /// Strategies tried, in order, including the one that succeeded.
    pub fn attempted(&self) -> &[Strategy] {
        &self.attempted
    }

    pub fn failures(&self) -> &[ProbeFailure] {
        &self.failures
    }

    /// Attempted strategies as a comma-separated list.
    pub fn attempted_summary(&self) -> String {
        if self.attempted.is_empty() {
            return "no strategies".to_string();
        }
        self.attempted
            .iter()
            .map(Strategy::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Fail with [`ExtdepError::DependencyNotFound`] when not found.
    pub fn require(self) -> Result<Self> {
        if self.found {
            Ok(self)
        } else {
            Err(ExtdepError::DependencyNotFound {
                attempted: self.attempted_summary(),
                name: self.name,
            })
        }
    }
}
