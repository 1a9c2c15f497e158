//! Compiler identity and per-vendor flag policy.
//!
//! The resolver only needs a vendor id; the flag policy is what the
//! `compiler` command shows.

pub mod detect;
pub mod identity;
pub mod policy;
pub mod version;

pub use detect::{classify, DetectedIdentity};
pub use identity::{CompilerId, CompilerIdentity, CompilerInfo, FixedIdentity, Language};
pub use policy::{FlagPolicy, PchStyle, StandardSyntax};
pub use version::{compare_versions, extract_version, version_at_least};
