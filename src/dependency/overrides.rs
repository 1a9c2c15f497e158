//! Snapshot of the environment variables the engine consults.
//!
//! The environment is read once, at the boundary, and passed down
//! explicitly. Probes never call `std::env` themselves.

use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variables captured for one resolution.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    vars: HashMap<String, String>,
}

impl EnvOverrides {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Raw value of `var`.
    pub fn get(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    /// `var` interpreted as a filesystem path.
    ///
    /// Existing paths are canonicalized, others are made absolute. Empty
    /// values and values that cannot be made absolute count as unset.
    pub fn path(&self, var: &str) -> Option<PathBuf> {
        let raw = self.get(var)?.trim();
        if raw.is_empty() {
            return None;
        }
        match std::fs::canonicalize(raw) {
            Ok(path) => Some(path),
            Err(_) => std::path::absolute(raw).ok(),
        }
    }
}
