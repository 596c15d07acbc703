//! Render options and their resolution from environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::RenderError;

/// Disables color when set to any non-empty value.
pub const NO_COLOR_VAR: &str = "NO_COLOR";
/// Project root used to shorten application frame paths.
pub const PROJECT_ROOT_VAR: &str = "ERR_PRETTY_ROOT";

/// Source of option values, normally the process environment.
pub trait EnvProvider {
    /// Raw value of `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// `true` when `key` is set to a non-empty value.
    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }
}

/// Reads options from the environment of the running process.
pub struct ProcessEnvProvider;

impl EnvProvider for ProcessEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Debug, Clone, Default)]
/// Fixed option values, for embedding callers and tests.
pub struct MapEnvProvider {
    values: HashMap<String, String>,
}

impl MapEnvProvider {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvProvider for MapEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options controlling how error records are rendered.
pub struct RenderOptions {
    /// Emit ANSI styling.
    pub color: bool,
    /// Root stripped from application frame paths.
    pub project_root: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            project_root: None,
        }
    }
}

impl RenderOptions {
    /// Resolves options from `NO_COLOR` and `ERR_PRETTY_ROOT`.
    pub fn from_env(env: &dyn EnvProvider) -> Result<Self, RenderError> {
        let color = !env.is_set(NO_COLOR_VAR);

        let project_root = match env.get(PROJECT_ROOT_VAR) {
            Some(root) if root.trim().is_empty() => {
                return Err(RenderError::ConfigError(format!(
                    "{PROJECT_ROOT_VAR} is set but empty"
                )));
            }
            Some(root) => Some(PathBuf::from(root)),
            None => None,
        };

        Ok(Self {
            color,
            project_root,
        })
    }
}
