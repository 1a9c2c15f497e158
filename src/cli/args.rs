//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::compiler::Language;
use crate::dependency::Strategy;

/// extdep - Locate external dependencies and derive their build flags.
#[derive(Debug, Parser)]
#[command(name = "extdep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .extdep/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show every strategy that was tried
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve one dependency and print its flags
    Resolve(ResolveArgs),

    /// Resolve every dependency declared in the configuration
    Check(CheckArgs),

    /// Show compiler identity and flag policy
    Compiler(CompilerArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Dependency name (e.g. lapack, coarray, zlib)
    pub name: String,

    /// Language the dependency is consumed from
    #[arg(short, long, default_value = "c")]
    pub language: Language,

    /// Link statically
    #[arg(long = "static")]
    pub static_link: bool,

    /// Strategies to try, in order (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub method: Vec<Strategy>,

    /// Exit with an error when the dependency is not found
    #[arg(long)]
    pub required: bool,

    /// Compiler id to assume instead of detecting it
    #[arg(long, value_name = "ID")]
    pub compiler_id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    /// Arguments for resolving `name` with every default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: Language::C,
            static_link: false,
            method: Vec::new(),
            required: false,
            compiler_id: None,
            json: false,
        }
    }
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `compiler` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CompilerArgs {
    /// Language whose compiler to show
    #[arg(short, long, default_value = "c")]
    pub language: Language,

    /// Compiler id to assume instead of detecting it
    #[arg(long, value_name = "ID")]
    pub compiler_id: Option<String>,

    /// Show the flags selecting this language standard
    #[arg(long)]
    pub std: Option<String>,

    /// Show the flags for this warning level
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub warn_level: Option<u8>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resolve_flags() {
        let cli = Cli::try_parse_from([
            "extdep",
            "resolve",
            "lapack",
            "--language",
            "fortran",
            "--static",
            "--method",
            "pkg-config,cmake",
            "--required",
            "--compiler-id",
            "gcc",
        ])
        .unwrap();

        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.name, "lapack");
        assert_eq!(args.language, Language::Fortran);
        assert!(args.static_link);
        assert_eq!(args.method, vec![Strategy::Registry, Strategy::BuildConfig]);
        assert!(args.required);
        assert_eq!(args.compiler_id.as_deref(), Some("gcc"));
    }

    #[test]
    fn resolve_defaults() {
        let cli = Cli::try_parse_from(["extdep", "resolve", "zlib"]).unwrap();
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.language, Language::C);
        assert!(args.method.is_empty());
        assert!(!args.json);
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(Cli::try_parse_from(["extdep", "resolve", "zlib", "--method", "conan"]).is_err());
    }

    #[test]
    fn warn_level_is_bounded() {
        assert!(Cli::try_parse_from(["extdep", "compiler", "--warn-level", "3"]).is_ok());
        assert!(Cli::try_parse_from(["extdep", "compiler", "--warn-level", "4"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["extdep", "check", "--verbose", "--debug"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.debug);
    }
}
