//! User configuration and its resolution into an [`EngineConfig`].
//!
//! Config is a TOML file at `<config dir>/tasker/config.toml`; an absent
//! file yields defaults. Env vars `TASKER_DATA_DIR`, `TASKER_REMOTE_URL`,
//! and `TASKER_EXPORT_DIR` override the file, and take precedence so tests
//! and scripts can redirect the engine without touching the user's config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// On-disk user configuration. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Base URL of the remote task API, e.g. `http://localhost:3001`.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Directory holding the local durable cache blob.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Directory export artifacts are written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    /// Surface `NotFound` from mutations on missing ids instead of
    /// silently no-opping.
    #[serde(default)]
    pub strict: bool,
}

/// Fully resolved engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub remote_url: Option<String>,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub strict: bool,
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("tasker/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

impl EngineConfig {
    /// Resolve a user config against env overrides and platform defaults.
    #[must_use]
    pub fn resolve(user: UserConfig) -> Self {
        let data_dir = env::var_os("TASKER_DATA_DIR")
            .map(PathBuf::from)
            .or(user.data_dir)
            .unwrap_or_else(default_data_dir);

        let remote_url = env::var("TASKER_REMOTE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .or(user.remote_url);

        let export_dir = env::var_os("TASKER_EXPORT_DIR")
            .map(PathBuf::from)
            .or(user.export_dir)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| data_dir.join("exports"));

        Self {
            remote_url,
            data_dir,
            export_dir,
            strict: user.strict,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".tasker"), |d| d.join("tasker"))
}
