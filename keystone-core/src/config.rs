//! Configuration management
//!
//! Reads the console's settings.json:
//! ```json
//! {
//!   "app": { "baseUrl": "http://localhost:2004", "demoMode": false }
//! }
//! ```
//! Unmanaged fields are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::rest::DEFAULT_BASE_URL;
use crate::domain::result::Result;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            demo_mode: false,
            other: HashMap::new(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Keystone configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote admin service
    pub base_url: String,
    /// Run against seeded in-memory data instead of the remote service
    pub demo_mode: bool,
    // Raw settings kept for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            demo_mode: false,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the keystone directory
    ///
    /// Overrides, in priority order:
    /// 1. `KEYSTONE_BASE_URL` / `KEYSTONE_DEMO_MODE` environment variables
    /// 2. settings.json
    pub fn load(keystone_dir: &Path) -> Result<Self> {
        let settings_path = keystone_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let base_url = std::env::var("KEYSTONE_BASE_URL")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| raw.app.base_url.clone());

        let demo_mode = match std::env::var("KEYSTONE_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        Ok(Self {
            base_url,
            demo_mode,
            _raw_settings: raw,
        })
    }

    /// Save config to the keystone directory, preserving settings the
    /// console doesn't manage
    pub fn save(&self, keystone_dir: &Path) -> Result<()> {
        let settings_path = keystone_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.base_url = self.base_url.clone();
        settings.app.demo_mode = self.demo_mode;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_settings_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.demo_mode);
    }

    #[test]
    fn test_load_reads_app_block() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "app": { "baseUrl": "http://admin.internal:8080", "demoMode": true } }"#,
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.base_url, "http://admin.internal:8080");
        assert!(config.demo_mode);
    }

    #[test]
    fn test_save_preserves_unmanaged_fields() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "app": { "theme": "dark" }, "shortcuts": { "save": "ctrl+s" } }"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.enable_demo_mode();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["app"]["demoMode"], true);
        assert_eq!(value["app"]["theme"], "dark");
        assert_eq!(value["shortcuts"]["save"], "ctrl+s");
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
