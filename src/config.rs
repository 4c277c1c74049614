use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "org-chart";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Password that unlocks the admin role
    pub admin_password: String,
    /// SQLite file holding the chart. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Port for the HTTP API
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_password: "admin123".to_string(),
            database_path: None,
            port: 3000,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Falls back to defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Apply `ORG_CHART_*` overrides. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(password) = lookup("ORG_CHART_ADMIN_PASSWORD") {
            self.admin_password = password;
        }
        if let Some(path) = lookup("ORG_CHART_DB") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(port) = lookup("ORG_CHART_PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        self
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
