//! Server configuration from config.toml with environment overrides

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use steamtools_client::SteamEndpoints;
use steamtools_core::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_COMMUNITY_BASE_URL, DEFAULT_MEDIA_BASE_URL,
};

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Key used when an invocation does not bring its own credentials
    #[serde(default)]
    pub steam_api_key: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_media_base_url")]
    pub media_base_url: String,

    #[serde(default = "default_community_base_url")]
    pub community_base_url: String,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_media_base_url() -> String {
    DEFAULT_MEDIA_BASE_URL.to_string()
}

fn default_community_base_url() -> String {
    DEFAULT_COMMUNITY_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            steam_api_key: None,
            api_base_url: default_api_base_url(),
            media_base_url: default_media_base_url(),
            community_base_url: default_community_base_url(),
        }
    }
}

impl Config {
    /// Load config from file (falling back to defaults), then apply environment overrides
    pub fn load() -> Self {
        let path = std::env::var("STEAMTOOLS_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path));
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    fn from_file(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Error parsing {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                tracing::warn!("Error reading {}: {}", path.display(), e);
            }
        }
        Config::default()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override fields from variables returned by `lookup`; empty values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("STEAM_API_KEY") {
            self.steam_api_key = Some(key);
        }
        if let Some(addr) = var("BIND_ADDRESS") {
            self.bind_address = addr;
        }
        if let Some(url) = var("STEAM_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(url) = var("STEAM_MEDIA_BASE_URL") {
            self.media_base_url = url;
        }
        if let Some(url) = var("STEAM_COMMUNITY_BASE_URL") {
            self.community_base_url = url;
        }
    }

    pub fn endpoints(&self) -> SteamEndpoints {
        SteamEndpoints {
            api_base: self.api_base_url.clone(),
            media_base: self.media_base_url.clone(),
            community_base: self.community_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            steam_api_key = "ABCDEF"
            bind_address = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.steam_api_key.as_deref(), Some("ABCDEF"));
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.endpoints(), SteamEndpoints::default());
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STEAM_API_KEY", "from-env"),
            ("STEAM_API_BASE_URL", "http://127.0.0.1:4000"),
            ("BIND_ADDRESS", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.steam_api_key.as_deref(), Some("from-env"));
        assert_eq!(config.endpoints().api_base, "http://127.0.0.1:4000");
        assert_eq!(config.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::from_file(Path::new("does/not/exist.toml"));
        assert_eq!(config, Config::default());
    }
}
