//! Resolution requests and detection strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compiler::Language;

/// A detection strategy a probe belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// pkg-config lookup.
    #[serde(alias = "pkg-config", alias = "pkgconfig")]
    Registry,
    /// CMake package lookup.
    #[serde(alias = "cmake")]
    BuildConfig,
    /// Compiler-native support, no external library.
    Intrinsic,
}

impl Strategy {
    /// All strategies, in default priority order.
    pub const ALL: [Strategy; 3] = [Strategy::Registry, Strategy::BuildConfig, Strategy::Intrinsic];

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Registry => "registry",
            Strategy::BuildConfig => "build-config",
            Strategy::Intrinsic => "intrinsic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "registry" | "pkg-config" | "pkgconfig" => Ok(Strategy::Registry),
            "build-config" | "cmake" => Ok(Strategy::BuildConfig),
            "intrinsic" => Ok(Strategy::Intrinsic),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

/// Whether the consumer links statically or against shared libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    Static,
    #[default]
    Shared,
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkMode::Static => f.write_str("static"),
            LinkMode::Shared => f.write_str("shared"),
        }
    }
}

/// One named dependency requirement. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    name: String,
    language: Language,
    link_mode: LinkMode,
    required: bool,
    strategies: Vec<Strategy>,
}

impl ResolutionRequest {
    /// Start building a request for `name`.
    pub fn builder(name: impl Into<String>) -> ResolutionRequestBuilder {
        ResolutionRequestBuilder {
            name: name.into(),
            language: Language::default(),
            link_mode: LinkMode::default(),
            required: false,
            strategies: Strategy::ALL.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn link_mode(&self) -> LinkMode {
        self.link_mode
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// Permitted strategies, in the order they were given.
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Whether `strategy` may be used for this request.
    pub fn permits(&self, strategy: Strategy) -> bool {
        self.strategies.contains(&strategy)
    }
}

/// Builder for [`ResolutionRequest`].
#[derive(Debug, Clone)]
pub struct ResolutionRequestBuilder {
    name: String,
    language: Language,
    link_mode: LinkMode,
    required: bool,
    strategies: Vec<Strategy>,
}

impl ResolutionRequestBuilder {
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn link_mode(mut self, link_mode: LinkMode) -> Self {
        self.link_mode = link_mode;
        self
    }

    /// Shorthand for `link_mode(LinkMode::Static)` when `true`.
    pub fn static_link(self, is_static: bool) -> Self {
        self.link_mode(if is_static {
            LinkMode::Static
        } else {
            LinkMode::Shared
        })
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Replace the permitted strategies. Duplicates keep their first position.
    pub fn strategies(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        let mut unique = Vec::new();
        for strategy in strategies {
            if !unique.contains(&strategy) {
                unique.push(strategy);
            }
        }
        self.strategies = unique;
        self
    }

    pub fn build(self) -> ResolutionRequest {
        ResolutionRequest {
            name: self.name,
            language: self.language,
            link_mode: self.link_mode,
            required: self.required,
            strategies: self.strategies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let request = ResolutionRequest::builder("zlib").build();
        assert_eq!(request.name(), "zlib");
        assert_eq!(request.language(), Language::C);
        assert_eq!(request.link_mode(), LinkMode::Shared);
        assert!(!request.required());
        assert_eq!(request.strategies(), &Strategy::ALL);
    }

    #[test]
    fn builder_dedups_strategies() {
        let request = ResolutionRequest::builder("lapack")
            .strategies([Strategy::BuildConfig, Strategy::Registry, Strategy::BuildConfig])
            .build();
        assert_eq!(
            request.strategies(),
            &[Strategy::BuildConfig, Strategy::Registry]
        );
        assert!(!request.permits(Strategy::Intrinsic));
    }

    #[test]
    fn static_link_shorthand() {
        let request = ResolutionRequest::builder("lapack").static_link(true).build();
        assert_eq!(request.link_mode(), LinkMode::Static);
    }

    #[test]
    fn strategy_display_strings() {
        assert_eq!(Strategy::Registry.to_string(), "registry");
        assert_eq!(Strategy::BuildConfig.to_string(), "build-config");
        assert_eq!(Strategy::Intrinsic.to_string(), "intrinsic");
    }

    #[test]
    fn strategy_parses_tool_aliases() {
        assert_eq!("pkg-config".parse::<Strategy>().unwrap(), Strategy::Registry);
        assert_eq!("CMake".parse::<Strategy>().unwrap(), Strategy::BuildConfig);
        assert!("conan".parse::<Strategy>().is_err());
    }

    #[test]
    fn strategy_deserializes_from_yaml() {
        let list: Vec<Strategy> = serde_yaml::from_str("[pkg-config, build-config, intrinsic]").unwrap();
        assert_eq!(list, Strategy::ALL.to_vec());
    }
}
