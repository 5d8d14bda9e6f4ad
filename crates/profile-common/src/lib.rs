//! Settings and config directory management for casting-profile.
//!
//! Layout:
//! ```text
//! <config_dir>/casting-profile/
//! └── config.json      # API base URL, session token, transport knobs
//! ```
//!
//! Lookup order for every value: environment variable, config file, default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const APP_DIR: &str = "casting-profile";
pub const CONFIG_FILE: &str = "config.json";

pub const ENV_CONFIG: &str = "PROFILE_CONFIG";
pub const ENV_API_URL: &str = "PROFILE_API_URL";
pub const ENV_API_TOKEN: &str = "PROFILE_API_TOKEN";

/// Persistent client settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub max_retries: u32,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token: None,
            request_timeout_ms: default_request_timeout_ms(),
            max_retries: 0,
        }
    }
}

impl Settings {
    /// Loads from the default location and applies environment overrides.
    pub fn load() -> Self {
        let mut settings = match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("Could not determine config dir, using default settings");
                Settings::default()
            }
        };
        settings.apply_env();
        settings
    }

    /// Reads `path`, falling back to defaults when the file is missing,
    /// empty or unparsable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Settings::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config file at {:?}: {}", path, e);
                return Settings::default();
            }
        };

        if content.trim().is_empty() {
            warn!("Config file {:?} is empty, using default settings", path);
            return Settings::default();
        }

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Failed to parse config ({}), using default. File may be corrupted.",
                    e
                );
                Settings::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path =
            config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config dir"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_API_TOKEN).ok(),
        );
    }

    fn apply_overrides(&mut self, api_url: Option<String>, token: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
    }
}

/// Directory holding the config file.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

/// Config file path: `$PROFILE_CONFIG` or `<config_dir>/config.json`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(val) = std::env::var(ENV_CONFIG) {
        return Some(PathBuf::from(val));
    }
    config_dir().map(|d| d.join(CONFIG_FILE))
}
