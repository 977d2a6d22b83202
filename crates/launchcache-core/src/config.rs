//! Application configuration management.
//!
//! Configuration holds the API endpoint, how many launches to request, the
//! cache key the listing is stored under, and whether the app runs offline.
//! Without an explicit `cache_key` the key follows `launch_count`, so
//! listings of different lengths are cached separately.
//!
//! Configuration is stored at `~/.config/launchcache/config.json`. Every
//! field is optional in the file; missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::cache::CacheKey;
use crate::connectivity::probe::DEFAULT_PROBE_TIMEOUT_MS;
use crate::orchestrator::DEFAULT_LAUNCH_COUNT;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "launchcache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Launch listing service root.
pub const DEFAULT_API_BASE_URL: &str = "https://launchlibrary.net/1.4/";

/// Environment override for `api_base_url`
pub const ENV_BASE_URL: &str = "LAUNCHCACHE_BASE_URL";

/// Environment override for `offline_mode` ("1"/"true" to enable)
pub const ENV_OFFLINE: &str = "LAUNCHCACHE_OFFLINE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub launch_count: usize,
    pub request_timeout_secs: u64,
    pub probe_timeout_ms: u64,
    pub offline_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<CacheKey>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            launch_count: DEFAULT_LAUNCH_COUNT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            offline_mode: false,
            cache_key: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from the given environment lookup.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(flag) = var(ENV_OFFLINE) {
            self.offline_mode = matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Key the listing is cached under.
    pub fn cache_key(&self) -> CacheKey {
        self.cache_key
            .clone()
            .unwrap_or_else(|| CacheKey::for_launch_count(self.launch_count))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().expect("TempDir creation should succeed");
        let config = Config::load_from(&temp_dir.path().join("config.json"))
            .expect("load should succeed");
        assert_eq!(config, Config::default());
        assert_eq!(config.launch_count, 10);
        assert_eq!(config.cache_key().as_str(), "top-10-launches");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().expect("TempDir creation should succeed");
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"offline_mode": true, "launch_count": 5}"#)
            .expect("write should succeed");

        let config = Config::load_from(&path).expect("load should succeed");
        assert!(config.offline_mode);
        assert_eq!(config.launch_count, 5);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.cache_key().as_str(), "top-5-launches");
    }

    #[test]
    fn test_explicit_cache_key_wins() {
        let config = Config {
            launch_count: 5,
            cache_key: Some(CacheKey::new("next-launches")),
            ..Default::default()
        };
        assert_eq!(config.cache_key().as_str(), "next-launches");
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = TempDir::new().expect("TempDir creation should succeed");
        let path = temp_dir.path().join("nested").join("config.json");
        let config = Config {
            cache_key: Some(CacheKey::new("next-launches")),
            ..Default::default()
        };
        config.save_to(&path).expect("save should succeed");
        assert_eq!(Config::load_from(&path).expect("load should succeed"), config);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|name| match name {
            ENV_BASE_URL => Some("http://localhost:8080/".to_string()),
            ENV_OFFLINE => Some("TRUE".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "http://localhost:8080/");
        assert!(config.offline_mode);

        config.apply_env(|name| (name == ENV_OFFLINE).then(|| "0".to_string()));
        assert!(!config.offline_mode);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp_dir = TempDir::new().expect("TempDir creation should succeed");
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "nope").expect("write should succeed");
        assert!(Config::load_from(&path).is_err());
    }
}
