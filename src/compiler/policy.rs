//! Per-vendor flag policy.
//!
//! Every vendor gets the same record; vendors differ only in which
//! fields they populate. Only C language standards are tabulated, C++ and
//! Fortran compilers report no selectable standard.

use std::path::Path;

use crate::error::{ExtdepError, Result};

use super::identity::{CompilerId, CompilerInfo, Language};
use super::version::version_at_least;

/// How a chosen standard is spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardSyntax {
    /// `-std=<std>`
    Gnu,
    /// `--<std>`
    Armcc,
    /// `/Qstd:<std>`, with no flag for c89
    IntelCl,
    /// `-lang=c` / `-lang=c99`
    Ccrx,
}

/// How precompiled headers are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PchStyle {
    None,
    /// `-fpch-preprocess -include <header>`
    Gnu,
    /// `--pch --pch_dir <dir> -I<dir>`, C++ only
    Pgi,
}

/// Flag tables for one compiler, one language.
#[derive(Debug, Clone)]
pub struct FlagPolicy {
    /// Vendor the tables belong to.
    pub compiler: CompilerId,
    /// Language the tables were built for.
    pub language: Language,
    /// Selectable standards, excluding `none`.
    pub standards: Vec<&'static str>,
    /// Spelling of the standard flag.
    pub standard_syntax: StandardSyntax,
    /// Warning flags for levels 0 through 3.
    pub warn_args: [Vec<&'static str>; 4],
    /// Precompiled header flavour.
    pub pch: PchStyle,
}

const GNU_WARN: [&str; 2] = ["-Wall", "-Winvalid-pch"];
const INTEL_WARN: [&str; 3] = ["-Wall", "-w3", "-diag-disable:remark"];

fn gnu_warn_table() -> [Vec<&'static str>; 4] {
    let base = GNU_WARN.to_vec();
    [
        vec![],
        base.clone(),
        [base.as_slice(), &["-Wextra"]].concat(),
        [base.as_slice(), &["-Wextra", "-Wpedantic"]].concat(),
    ]
}

fn intel_warn_table() -> [Vec<&'static str>; 4] {
    let base = INTEL_WARN.to_vec();
    [
        vec![],
        base.clone(),
        [base.as_slice(), &["-Wextra"]].concat(),
        [base.as_slice(), &["-Wextra"]].concat(),
    ]
}

fn msvc_warn_table() -> [Vec<&'static str>; 4] {
    [vec!["/W1"], vec!["/W2"], vec!["/W3"], vec!["/W4"]]
}

fn pgi_warn_table() -> [Vec<&'static str>; 4] {
    let inform = vec!["-Minform=inform"];
    [vec![], inform.clone(), inform.clone(), inform]
}

fn empty_warn_table() -> [Vec<&'static str>; 4] {
    [vec![], vec![], vec![], vec![]]
}

/// C and GNU standards with the optional c17/c18 additions, in table order.
fn iso_and_gnu(base: &[&'static str], c17: bool, c18: bool) -> Vec<&'static str> {
    let mut iso: Vec<&'static str> = base.iter().map(|s| iso_name(s)).collect();
    let mut gnu: Vec<&'static str> = base.iter().map(|s| gnu_name(s)).collect();
    if c17 {
        iso.push("c17");
        gnu.push("gnu17");
    }
    if c18 {
        iso.push("c18");
        gnu.push("gnu18");
    }
    iso.extend(gnu);
    iso
}

fn iso_name(year: &str) -> &'static str {
    match year {
        "89" => "c89",
        "90" => "c90",
        "99" => "c99",
        _ => "c11",
    }
}

fn gnu_name(year: &str) -> &'static str {
    match year {
        "89" => "gnu89",
        "90" => "gnu90",
        "99" => "gnu99",
        _ => "gnu11",
    }
}

fn c_standards(id: CompilerId, version: &str) -> Vec<&'static str> {
    match id {
        CompilerId::Gcc => {
            let modern = version_at_least(version, "8.0.0");
            iso_and_gnu(&["89", "99", "11"], modern, modern)
        }
        CompilerId::Clang | CompilerId::Emscripten => iso_and_gnu(
            &["89", "99", "11"],
            version_at_least(version, "6.0.0"),
            version_at_least(version, "8.0.0"),
        ),
        CompilerId::AppleClang => iso_and_gnu(
            &["89", "99", "11"],
            version_at_least(version, "10.0.0"),
            version_at_least(version, "11.0.0"),
        ),
        CompilerId::Armclang => iso_and_gnu(&["90", "99", "11"], false, false),
        CompilerId::Intel => {
            let mut stds = vec!["c89", "c99"];
            if version_at_least(version, "16.0.0") {
                stds.push("c11");
            }
            stds.extend(["gnu89", "gnu99"]);
            stds
        }
        CompilerId::IntelCl => vec!["c89", "c99", "c11"],
        CompilerId::Elbrus => vec![
            "c89",
            "c90",
            "c9x",
            "c99",
            "c1x",
            "c11",
            "gnu89",
            "gnu90",
            "gnu9x",
            "gnu99",
            "gnu1x",
            "gnu11",
            "iso9899:2011",
            "iso9899:1990",
            "iso9899:199409",
            "iso9899:1999",
        ],
        CompilerId::Arm => vec!["c90", "c99"],
        CompilerId::Ccrx => vec!["c89", "c99"],
        CompilerId::Pgi | CompilerId::Msvc | CompilerId::ClangCl => vec![],
    }
}

impl FlagPolicy {
    /// Build the policy for an identified compiler.
    pub fn for_compiler(info: &CompilerInfo) -> Self {
        let id = info.id;

        let standards = if info.language == Language::C {
            c_standards(id, &info.version)
        } else {
            Vec::new()
        };

        let standard_syntax = match id {
            CompilerId::Arm => StandardSyntax::Armcc,
            CompilerId::IntelCl => StandardSyntax::IntelCl,
            CompilerId::Ccrx => StandardSyntax::Ccrx,
            _ => StandardSyntax::Gnu,
        };

        let warn_args = match id {
            CompilerId::Gcc
            | CompilerId::Clang
            | CompilerId::AppleClang
            | CompilerId::Emscripten
            | CompilerId::Armclang
            | CompilerId::Elbrus => gnu_warn_table(),
            CompilerId::Intel => intel_warn_table(),
            CompilerId::Msvc | CompilerId::ClangCl | CompilerId::IntelCl => msvc_warn_table(),
            CompilerId::Pgi => pgi_warn_table(),
            CompilerId::Arm | CompilerId::Ccrx => empty_warn_table(),
        };

        let pch = match id {
            CompilerId::Gcc | CompilerId::Elbrus => PchStyle::Gnu,
            CompilerId::Pgi => PchStyle::Pgi,
            _ => PchStyle::None,
        };

        Self {
            compiler: id,
            language: info.language,
            standards,
            standard_syntax,
            warn_args,
            pch,
        }
    }

    /// Standards accepted by [`FlagPolicy::standard_args`], excluding `none`.
    pub fn supported_standards(&self) -> &[&'static str] {
        &self.standards
    }

    /// Compile flags selecting `standard`.
    ///
    /// `none` always yields no flags.
    pub fn standard_args(&self, standard: &str) -> Result<Vec<String>> {
        if standard == "none" {
            return Ok(Vec::new());
        }
        if !self.standards.contains(&standard) {
            return Err(ExtdepError::UnsupportedStandard {
                compiler: self.compiler.to_string(),
                standard: standard.to_string(),
            });
        }

        let args = match self.standard_syntax {
            StandardSyntax::Gnu => vec![format!("-std={}", standard)],
            StandardSyntax::Armcc => vec![format!("--{}", standard)],
            StandardSyntax::IntelCl if standard == "c89" => {
                tracing::warn!(
                    "ICL doesn't explicitly implement c89, setting the standard to 'none', which is close."
                );
                Vec::new()
            }
            StandardSyntax::IntelCl => vec![format!("/Qstd:{}", standard)],
            StandardSyntax::Ccrx => match standard {
                "c89" => vec!["-lang=c".to_string()],
                _ => vec!["-lang=c99".to_string()],
            },
        };
        Ok(args)
    }

    /// Warning flags for `level`; levels above 3 use the level 3 table.
    pub fn warn_args(&self, level: u8) -> Vec<String> {
        let idx = usize::from(level.min(3));
        self.warn_args[idx].iter().map(|s| s.to_string()).collect()
    }

    /// Flags for consuming a precompiled `header` built into `pch_dir`.
    pub fn pch_use_args(&self, pch_dir: &Path, header: &str) -> Vec<String> {
        match self.pch {
            PchStyle::None => Vec::new(),
            PchStyle::Gnu => {
                let base = Path::new(header)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| header.to_string());
                vec!["-fpch-preprocess".to_string(), "-include".to_string(), base]
            }
            PchStyle::Pgi => {
                if self.language != Language::Cpp {
                    return Vec::new();
                }
                let parent = pch_dir.parent().unwrap_or(pch_dir);
                let hdr = parent.join(header);
                let dir = hdr.parent().unwrap_or(parent).display().to_string();
                vec![
                    "--pch".to_string(),
                    "--pch_dir".to_string(),
                    dir.clone(),
                    format!("-I{}", dir),
                ]
            }
        }
    }
}
