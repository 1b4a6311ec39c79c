//! Application settings.
//!
//! Settings live in a TOML file found by priority:
//! 1. Explicit path (`--config`)
//! 2. `LOGLENS_CONFIG` environment variable
//! 3. `<config dir>/loglens/config.toml`
//!
//! A missing file means defaults. Schema files default to the same
//! directory, or `./.loglens` on systems without a config directory.

use crate::error::{LoglensError, Result};
use crate::schema::{SchemaLoader, SchemaStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "LOGLENS_CONFIG";
pub const CUSTOM_SCHEMA_FILE: &str = "custom_schema.json";
pub const DEFAULT_SCHEMA_FILE: &str = "default_schema.json";

/// Directory holding the settings and schema files
pub fn config_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("loglens"),
        None => PathBuf::from(".loglens"),
    }
}

/// Locate the settings file: explicit path, then environment, then config dir
pub fn resolve_config_path(explicit_path: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit_path {
        return expand_tilde(&path.to_string_lossy());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if !env_path.trim().is_empty() {
            return expand_tilde(&env_path);
        }
    }

    config_dir().join("config.toml")
}

/// Expand a leading `~/` to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

fn default_reset_custom_on_exit() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Custom schema file; defaults to `custom_schema.json` in the config dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_schema: Option<PathBuf>,

    /// Default schema file; defaults to `default_schema.json` in the config dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_schema: Option<PathBuf>,

    /// Clear the custom schema when an interactive session ends
    #[serde(default = "default_reset_custom_on_exit")]
    pub reset_custom_on_exit: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            custom_schema: None,
            default_schema: None,
            reset_custom_on_exit: default_reset_custom_on_exit(),
        }
    }
}

impl AppConfig {
    /// Load settings from the resolved location
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        Self::load_from(&resolve_config_path(explicit_path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            LoglensError::file_error(format!("Cannot read settings {}", path.display()), e)
        })?;
        toml::from_str(&content).map_err(|e| {
            LoglensError::config(format!("Invalid settings file {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| LoglensError::config(format!("Cannot serialize settings: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace schema locations with command-line values when given
    pub fn with_overrides(mut self, custom: Option<PathBuf>, default: Option<PathBuf>) -> Self {
        if custom.is_some() {
            self.custom_schema = custom;
        }
        if default.is_some() {
            self.default_schema = default;
        }
        self
    }

    pub fn custom_schema_path(&self) -> PathBuf {
        self.custom_schema
            .as_deref()
            .map(|path| expand_tilde(&path.to_string_lossy()))
            .unwrap_or_else(|| config_dir().join(CUSTOM_SCHEMA_FILE))
    }

    pub fn default_schema_path(&self) -> PathBuf {
        self.default_schema
            .as_deref()
            .map(|path| expand_tilde(&path.to_string_lossy()))
            .unwrap_or_else(|| config_dir().join(DEFAULT_SCHEMA_FILE))
    }

    pub fn schema_loader(&self) -> SchemaLoader {
        SchemaLoader::new(self.custom_schema_path(), self.default_schema_path())
    }

    pub fn schema_store(&self) -> SchemaStore {
        SchemaStore::new(self.schema_loader())
    }
}
