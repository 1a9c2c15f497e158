//! extdep - External dependency resolution for native toolchains.
//!
//! extdep finds libraries such as LAPACK, OpenCoarrays or zlib for a C, C++
//! or Fortran build. It tries pkg-config, CMake package lookup and compiler
//! built-in support in order, and reports the compile and link flags of the
//! first one that succeeds.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compiler`] - Compiler identity detection and per-vendor flag policy
//! - [`config`] - Configuration loading, merging, and validation
//! - [`dependency`] - Candidate building, probing, and resolution
//! - [`error`] - Error types and result aliases
//! - [`shell`] - External tool execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use extdep::compiler::{CompilerId, FixedIdentity, Language};
//! use extdep::dependency::{resolve_dependency, EnvOverrides, ProbeContext, ResolutionRequest};
//! use extdep::shell::MockRunner;
//!
//! let runner = MockRunner::new()
//!     .on_success("pkg-config --modversion lapack", "3.9.0\n")
//!     .on_success("pkg-config --cflags lapack", "\n")
//!     .on_success("pkg-config --libs lapack", "-llapack -lblas\n");
//! let request = ResolutionRequest::builder("lapack")
//!     .language(Language::Fortran)
//!     .build();
//!
//! let result = resolve_dependency(
//!     &request,
//!     &FixedIdentity::new(CompilerId::Gcc),
//!     &EnvOverrides::new(),
//!     &ProbeContext::new(&runner),
//! );
//! assert_eq!(result.link_args(), &["-llapack", "-lblas"]);
//! ```

pub mod cli;
pub mod compiler;
pub mod config;
pub mod dependency;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{ExtdepError, Result};
