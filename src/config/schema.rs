//! Configuration schema definitions for extdep.
//!
//! This module contains the struct definitions that map to the
//! `.extdep/config.yml` file format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compiler::Language;
use crate::dependency::{LinkMode, ResolutionRequest, Strategy};

/// Root configuration structure for `.extdep/config.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtdepConfig {
    /// Global settings
    pub settings: Settings,

    /// Compiler executables per language
    pub compilers: CompilerConfig,

    /// Declared dependencies, checked by `extdep check`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, DependencyConfig>,
}

/// Detection tools and defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// pkg-config executable used for registry lookups
    pub pkg_config: String,

    /// CMake executable used for build-config lookups
    pub cmake: String,

    /// Strategies permitted when a request names none
    pub default_strategies: Vec<Strategy>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pkg_config: "pkg-config".to_string(),
            cmake: "cmake".to_string(),
            default_strategies: Strategy::ALL.to_vec(),
        }
    }
}

/// Per-language compiler executables.
///
/// Unset languages fall back to `cc`, `c++` and `gfortran`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fortran: Option<String>,
}

impl CompilerConfig {
    /// Configured executable for `language`.
    pub fn for_language(&self, language: Language) -> Option<&str> {
        match language {
            Language::C => self.c.as_deref(),
            Language::Cpp => self.cpp.as_deref(),
            Language::Fortran => self.fortran.as_deref(),
        }
    }
}

/// One declared dependency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Language the dependency is consumed from
    pub language: Language,

    /// Link statically
    #[serde(rename = "static")]
    pub static_link: bool,

    /// Fail `extdep check` when missing
    pub required: bool,

    /// Permitted strategies; the global default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategies: Option<Vec<Strategy>>,
}

impl ExtdepConfig {
    /// Build a request for the declared dependency `name`.
    pub fn request_for(&self, name: &str, dep: &DependencyConfig) -> ResolutionRequest {
        let strategies = dep
            .strategies
            .clone()
            .unwrap_or_else(|| self.settings.default_strategies.clone());
        ResolutionRequest::builder(name)
            .language(dep.language)
            .link_mode(if dep.static_link {
                LinkMode::Static
            } else {
                LinkMode::Shared
            })
            .required(dep.required)
            .strategies(strategies)
            .build()
    }
}
