//! Compiler identity: vendor ids, languages, and the identity service contract.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExtdepError, Result};

/// Source language a dependency is consumed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    C,
    #[serde(alias = "c++", alias = "cxx")]
    Cpp,
    #[serde(alias = "f")]
    Fortran,
}

impl Language {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Fortran => "fortran",
        }
    }

    /// Environment variable conventionally naming this language's compiler.
    pub fn compiler_env_var(&self) -> &'static str {
        match self {
            Language::C => "CC",
            Language::Cpp => "CXX",
            Language::Fortran => "FC",
        }
    }

    /// Compiler executable used when nothing else is configured.
    pub fn default_compiler(&self) -> &'static str {
        match self {
            Language::C => "cc",
            Language::Cpp => "c++",
            Language::Fortran => "gfortran",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" => Ok(Self::C),
            "cpp" | "c++" | "cxx" => Ok(Self::Cpp),
            "fortran" | "f" => Ok(Self::Fortran),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

/// Compiler vendor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerId {
    Gcc,
    Clang,
    AppleClang,
    Emscripten,
    Armclang,
    Arm,
    Pgi,
    #[serde(rename = "lcc")]
    Elbrus,
    Intel,
    IntelCl,
    Msvc,
    ClangCl,
    Ccrx,
}

impl CompilerId {
    /// Every known vendor, in display order.
    pub const ALL: [CompilerId; 13] = [
        CompilerId::Gcc,
        CompilerId::Clang,
        CompilerId::AppleClang,
        CompilerId::Emscripten,
        CompilerId::Armclang,
        CompilerId::Arm,
        CompilerId::Pgi,
        CompilerId::Elbrus,
        CompilerId::Intel,
        CompilerId::IntelCl,
        CompilerId::Msvc,
        CompilerId::ClangCl,
        CompilerId::Ccrx,
    ];

    /// The id string used on the command line and in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerId::Gcc => "gcc",
            CompilerId::Clang => "clang",
            CompilerId::AppleClang => "apple-clang",
            CompilerId::Emscripten => "emscripten",
            CompilerId::Armclang => "armclang",
            CompilerId::Arm => "arm",
            CompilerId::Pgi => "pgi",
            CompilerId::Elbrus => "lcc",
            CompilerId::Intel => "intel",
            CompilerId::IntelCl => "intel-cl",
            CompilerId::Msvc => "msvc",
            CompilerId::ClangCl => "clang-cl",
            CompilerId::Ccrx => "ccrx",
        }
    }

    /// The `COMPILER_ID` value CMake uses for this vendor.
    pub fn cmake_id(&self) -> &'static str {
        match self {
            CompilerId::Gcc | CompilerId::Elbrus | CompilerId::Ccrx => "GNU",
            CompilerId::Clang | CompilerId::Emscripten => "Clang",
            CompilerId::AppleClang => "AppleClang",
            CompilerId::Armclang => "ARMClang",
            CompilerId::Arm => "ARMCC",
            CompilerId::Pgi => "PGI",
            CompilerId::Intel | CompilerId::IntelCl => "Intel",
            CompilerId::Msvc | CompilerId::ClangCl => "MSVC",
        }
    }

    /// Parse an id string, mapping unknown ids to [`ExtdepError::UnknownCompiler`].
    pub fn parse(id: &str) -> Result<Self> {
        id.parse().map_err(|_| ExtdepError::UnknownCompiler { id: id.to_string() })
    }
}

impl fmt::Display for CompilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        CompilerId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == lowered)
            .or(match lowered.as_str() {
                "elbrus" => Some(CompilerId::Elbrus),
                "gnu" => Some(CompilerId::Gcc),
                _ => None,
            })
            .ok_or_else(|| format!("unknown compiler id: {}", s))
    }
}

/// What the identity service knows about one toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerInfo {
    /// Vendor identity.
    pub id: CompilerId,
    /// Version reported by the compiler (`"unknown"` when not reported).
    pub version: String,
    /// Language this compiler was identified for.
    pub language: Language,
    /// Resolved executable, when the compiler was found on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Reports the vendor identity of the compiler used for a language.
pub trait CompilerIdentity {
    /// Identify the compiler for `language`.
    fn identify(&self, language: Language) -> Result<CompilerInfo>;
}

/// An identity supplied up front instead of detected.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    id: CompilerId,
    version: String,
}

impl FixedIdentity {
    /// Identity with an unknown version.
    pub fn new(id: CompilerId) -> Self {
        Self {
            id,
            version: "unknown".to_string(),
        }
    }

    /// Identity with a known version.
    pub fn with_version(id: CompilerId, version: impl Into<String>) -> Self {
        Self {
            id,
            version: version.into(),
        }
    }
}

impl CompilerIdentity for FixedIdentity {
    fn identify(&self, language: Language) -> Result<CompilerInfo> {
        Ok(CompilerInfo {
            id: self.id,
            version: self.version.clone(),
            language,
            path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_aliases() {
        assert_eq!("C".parse::<Language>().unwrap(), Language::C);
        assert_eq!("c++".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("cxx".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("Fortran".parse::<Language>().unwrap(), Language::Fortran);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn language_env_vars() {
        assert_eq!(Language::C.compiler_env_var(), "CC");
        assert_eq!(Language::Cpp.compiler_env_var(), "CXX");
        assert_eq!(Language::Fortran.compiler_env_var(), "FC");
    }

    #[test]
    fn compiler_id_round_trips_through_display() {
        for id in CompilerId::ALL {
            assert_eq!(id.to_string().parse::<CompilerId>().unwrap(), id);
        }
    }

    #[test]
    fn compiler_id_aliases() {
        assert_eq!("elbrus".parse::<CompilerId>().unwrap(), CompilerId::Elbrus);
        assert_eq!("GNU".parse::<CompilerId>().unwrap(), CompilerId::Gcc);
    }

    #[test]
    fn unknown_compiler_id_is_an_error() {
        let err = CompilerId::parse("tcc").unwrap_err();
        assert!(matches!(err, ExtdepError::UnknownCompiler { ref id } if id == "tcc"));
    }

    #[test]
    fn cmake_ids() {
        assert_eq!(CompilerId::Gcc.cmake_id(), "GNU");
        assert_eq!(CompilerId::IntelCl.cmake_id(), "Intel");
        assert_eq!(CompilerId::AppleClang.cmake_id(), "AppleClang");
    }

    #[test]
    fn fixed_identity_reports_language() {
        let identity = FixedIdentity::with_version(CompilerId::Intel, "19.1.0");
        let info = identity.identify(Language::Fortran).unwrap();
        assert_eq!(info.id, CompilerId::Intel);
        assert_eq!(info.version, "19.1.0");
        assert_eq!(info.language, Language::Fortran);
    }

    #[test]
    fn fixed_identity_defaults_to_unknown_version() {
        let info = FixedIdentity::new(CompilerId::Gcc)
            .identify(Language::C)
            .unwrap();
        assert_eq!(info.version, "unknown");
    }

    #[test]
    fn compiler_id_serializes_as_id_string() {
        let json = serde_json::to_string(&CompilerId::IntelCl).unwrap();
        assert_eq!(json, "\"intel-cl\"");
        let json = serde_json::to_string(&CompilerId::Elbrus).unwrap();
        assert_eq!(json, "\"lcc\"");
    }
}
