use crate::model::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Commands used to reach the marketplace backend
///
/// Each command is run through the shell; its stdout must be CSV with a
/// header row. The dashboard never talks to the backend directly - it only
/// observes the lifecycle of these commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commands {
    pub stores: String,
    pub products: String,
    pub orders: String,
    /// Save command; the record payload is appended as a JSON argument
    pub save: String,
    /// Delete command; dataset slug and record id are appended as arguments
    pub delete: String,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            stores: "curl -fsS http://127.0.0.1:5000/api/export/stores.csv".to_string(),
            products: "curl -fsS http://127.0.0.1:5000/api/export/products.csv".to_string(),
            orders: "curl -fsS http://127.0.0.1:5000/api/export/orders.csv".to_string(),
            save: "souq-admin save".to_string(),
            delete: "souq-admin delete".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Persisted theme preference, applied at startup
    #[serde(default)]
    pub theme: Theme,
    /// Backend address probed by the connectivity monitor
    #[serde(default = "default_backend_addr")]
    pub backend_addr: String,
    #[serde(default)]
    pub commands: Commands,
    /// Per-panel auto-refresh intervals in milliseconds, keyed by dataset
    /// slug; a panel without an entry uses the 30000 ms default.
    #[serde(default)]
    pub auto_refresh_ms: BTreeMap<String, u64>,
}

fn default_backend_addr() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            backend_addr: default_backend_addr(),
            commands: Commands::default(),
            auto_refresh_ms: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".souq-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.backend_addr, "127.0.0.1:5000");
        assert_eq!(back.theme, Theme::Light);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert!(config.auto_refresh_ms.is_empty());
        assert!(config.commands.stores.contains("stores"));
    }

    #[test]
    fn test_theme_persists_in_json() {
        let mut config = Config::default();
        config.theme = Theme::Dark;
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"dark\""));
    }
}
