//! Error types for extdep operations.
//!
//! This module defines [`ExtdepError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe failures never surface here: they are classified outcomes
//!   (see [`crate::dependency::NotFoundReason`]) recovered by the resolver
//! - Use `ExtdepError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ExtdepError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for extdep operations.
#[derive(Debug, Error)]
pub enum ExtdepError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Compiler id string is not one of the known vendors.
    #[error("Unknown compiler id: {id}")]
    UnknownCompiler { id: String },

    /// The compiler for a language could not be identified.
    #[error("Could not identify the {language} compiler: {message}")]
    CompilerDetectionFailed { language: String, message: String },

    /// Requested language standard is not offered by the compiler.
    #[error("Compiler '{compiler}' does not support standard '{standard}'")]
    UnsupportedStandard { compiler: String, standard: String },

    /// An external tool is not installed or not on PATH.
    #[error("Tool not found: {program}")]
    ToolNotFound { program: String },

    /// External command could not be run to completion.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A required dependency could not be located by any strategy.
    #[error("Dependency '{name}' not found (tried: {attempted})")]
    DependencyNotFound { name: String, attempted: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for extdep operations.
pub type Result<T> = std::result::Result<T, ExtdepError>;
