//! External dependency resolution.
//!
//! A [`ResolutionRequest`] is turned into an ordered [`CandidatePlan`] of
//! [`Probe`]s, which the [`Resolver`] tries one at a time until one finds
//! the dependency.
//!
//! # Example
//!
//! ```
//! use extdep::compiler::{CompilerId, FixedIdentity, Language};
//! use extdep::dependency::{resolve_dependency, EnvOverrides, ProbeContext, ResolutionRequest};
//! use extdep::shell::MockRunner;
//!
//! let runner = MockRunner::new();
//! let ctx = ProbeContext::new(&runner);
//! let request = ResolutionRequest::builder("coarray")
//!     .language(Language::Fortran)
//!     .build();
//!
//! let result = resolve_dependency(
//!     &request,
//!     &FixedIdentity::new(CompilerId::Intel),
//!     &EnvOverrides::new(),
//!     &ctx,
//! );
//! assert!(result.is_found());
//! assert_eq!(result.compile_args(), &["-coarray=shared"]);
//! ```

pub mod candidates;
pub mod cmake;
pub mod family;
pub mod overrides;
pub mod patch;
pub mod pkgconfig;
pub mod probe;
pub mod request;
pub mod resolver;
pub mod result;

pub use candidates::{build as build_candidates, CandidatePlan, OverrideContext};
pub use family::{DependencyFamily, OverrideSpec};
pub use overrides::EnvOverrides;
pub use patch::OverridePathError;
pub use probe::{FoundDependency, NotFoundReason, Probe, ProbeContext, ProbeOutcome};
pub use request::{LinkMode, ResolutionRequest, ResolutionRequestBuilder, Strategy};
pub use resolver::{resolve_dependency, Resolver};
pub use result::{ProbeFailure, ResolutionResult};
