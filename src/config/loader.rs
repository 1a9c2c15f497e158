//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! various locations in the correct priority order. Unlike a missing
//! dependency, a missing configuration is never an error: every setting
//! has a default.

use crate::config::merger::merge_configs;
use crate::config::schema::ExtdepConfig;
use crate::error::{ExtdepError, Result};
use crate::shell::home_dir;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding configuration, in the home and project directories.
pub const CONFIG_DIR: &str = ".extdep";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.extdep/config.yml`)
/// 2. Project config (`.extdep/config.yml`)
/// 3. Local overrides (`.extdep/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config: ~/.extdep/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .extdep/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .extdep/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: home_dir()
                .and_then(|home| existing(home.join(CONFIG_DIR).join("config.yml"))),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Check if any config file exists.
    pub fn has_any(&self) -> bool {
        !self.all_existing().is_empty()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.extdep` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into ExtdepConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ExtdepConfig> {
    let value = load_config_value(path)?;
    from_value(value, path)
}

/// Parse YAML content into ExtdepConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ExtdepConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ExtdepError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_value(value, source_path)
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtdepError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ExtdepError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| ExtdepError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn from_value(value: serde_yaml::Value, path: &Path) -> Result<ExtdepConfig> {
    // An empty file is a null document.
    if value.is_null() {
        return Ok(ExtdepConfig::default());
    }
    serde_yaml::from_value(value).map_err(|e| ExtdepError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge all config files for a project.
///
/// Falls back to defaults when no config file exists.
///
/// # Errors
///
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<ExtdepConfig> {
    let paths = ConfigPaths::discover(project_root);
    load_paths(&paths, project_root)
}

fn load_paths(paths: &ConfigPaths, project_root: &Path) -> Result<ExtdepConfig> {
    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config from {}", path.display());
        let value = load_config_value(path)?;
        if !value.is_null() {
            configs.push(value);
        }
    }

    if configs.is_empty() {
        return Ok(ExtdepConfig::default());
    }

    let merged = merge_configs(&configs);
    serde_yaml::from_value(merged).map_err(|e| ExtdepError::ConfigParseError {
        path: project_root.join(CONFIG_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ExtdepConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}
