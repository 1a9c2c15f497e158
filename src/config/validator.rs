//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Tool executables must not be empty
//! - At least one default strategy must be permitted
//! - A dependency that lists strategies must list at least one

use crate::config::schema::ExtdepConfig;
use crate::error::{ExtdepError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Dependency name if error is dependency-specific
    pub dependency: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &ExtdepConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_settings(config));
    errors.extend(validate_compilers(config));
    errors.extend(validate_dependencies(config));

    errors
}

fn validate_settings(config: &ExtdepConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let settings = &config.settings;

    for (key, value) in [("pkg_config", &settings.pkg_config), ("cmake", &settings.cmake)] {
        if value.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-tool".to_string(),
                message: format!("Setting '{}' must name an executable", key),
                dependency: None,
            });
        }
    }

    if settings.default_strategies.is_empty() {
        errors.push(ValidationError {
            rule: "no-strategies".to_string(),
            message: "Setting 'default_strategies' must list at least one strategy".to_string(),
            dependency: None,
        });
    }

    errors
}

fn validate_compilers(config: &ExtdepConfig) -> Vec<ValidationError> {
    let compilers = &config.compilers;
    [("c", &compilers.c), ("cpp", &compilers.cpp), ("fortran", &compilers.fortran)]
        .into_iter()
        .filter_map(|(lang, exe)| match exe {
            Some(exe) if exe.trim().is_empty() => Some(ValidationError {
                rule: "empty-compiler".to_string(),
                message: format!("Compiler for '{}' must not be empty", lang),
                dependency: None,
            }),
            _ => None,
        })
        .collect()
}

fn validate_dependencies(config: &ExtdepConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, dep) in &config.dependencies {
        if name.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-name".to_string(),
                message: "Dependency names must not be empty".to_string(),
                dependency: Some(name.clone()),
            });
        }

        if matches!(&dep.strategies, Some(list) if list.is_empty()) {
            errors.push(ValidationError {
                rule: "no-strategies".to_string(),
                message: format!(
                    "Dependency '{}' lists no strategies and could never be found",
                    name
                ),
                dependency: Some(name.clone()),
            });
        }
    }

    errors
}

/// Validate and return an error combining all messages.
pub fn validate(config: &ExtdepConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ExtdepError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
