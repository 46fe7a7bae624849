//! Settings loader with multi-source merging

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use mapsync_domain::source::DEFAULT_CONFIG_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Settings that could not be read or merged.
#[derive(Error, Debug)]
#[error("Failed to load settings: {0}")]
pub struct SettingsError(#[from] Box<figment::Error>);

/// Runtime settings for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// JSON-RPC endpoint of the network hosting the Map contract.
    /// Required for every operation; deliberately has no default.
    pub rpc_url: Option<String>,
    /// Base URL the configuration documents are published under.
    pub config_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: None,
            config_base_url: DEFAULT_CONFIG_BASE_URL.to_string(),
        }
    }
}

/// Settings loader that handles file discovery and merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MAPSYNC_*` environment variables (e.g. `MAPSYNC_RPC_URL`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./mapsync.toml`
    /// 4. `~/.config/mapsync/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<Settings, SettingsError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        let project_path = PathBuf::from("mapsync.toml");
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("MAPSYNC_"))
            .extract()
            .map_err(|e| SettingsError(Box::new(e)))
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mapsync").join("config.toml"))
    }
}
