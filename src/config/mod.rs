//! Configuration loading, parsing, and validation for extdep.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use extdep::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("extdep.yml");
//! fs::write(&path, "dependencies:\n  lapack:\n    language: fortran\n").unwrap();
//!
//! let config = load_config(temp.path(), Some(&path)).unwrap();
//! validate(&config).unwrap();
//! assert!(config.dependencies.contains_key("lapack"));
//! ```
//!
//! # Configuration File Locations
//!
//! extdep discovers and merges configuration in this order:
//! 1. User global config (`~/.extdep/config.yml`)
//! 2. Project config (`.extdep/config.yml`)
//! 3. Local overrides (`.extdep/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{CompilerConfig, DependencyConfig, ExtdepConfig, Settings};

// Loader re-exports
pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, ConfigPaths, CONFIG_DIR,
};

// Merger re-exports
pub use merger::{deep_merge, merge_configs};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};
