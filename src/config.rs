use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::category::Category;
use crate::profile::QuotaCounts;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "supabase" or "memory"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Project URL, e.g. https://xyz.supabase.co
    #[serde(default)]
    pub url: Option<String>,

    /// Env var holding the project's anon key ("none" to send no key)
    #[serde(default = "default_anon_key_env")]
    pub anon_key_env: Option<String>,

    /// Env var holding the signed-in user's access token
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,

    /// Env var holding the signed-in user's id
    #[serde(default = "default_user_id_env")]
    pub user_id_env: String,

    /// HTTP timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: None,
            anon_key_env: default_anon_key_env(),
            access_token_env: default_access_token_env(),
            user_id_env: default_user_id_env(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "supabase".to_string()
}

fn default_anon_key_env() -> Option<String> {
    Some("SUPABASE_ANON_KEY".to_string())
}

fn default_access_token_env() -> String {
    "PROMPTCRAFT_ACCESS_TOKEN".to_string()
}

fn default_user_id_env() -> String {
    "PROMPTCRAFT_USER_ID".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Daily allotments used to seed local stores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "default_image_limit")]
    pub image: u32,
    #[serde(default = "default_video_limit")]
    pub video: u32,
    #[serde(default = "default_music_limit")]
    pub music: u32,
    #[serde(default = "default_app_limit")]
    pub app: u32,
}

fn default_image_limit() -> u32 {
    Category::Image.daily_allotment()
}

fn default_video_limit() -> u32 {
    Category::Video.daily_allotment()
}

fn default_music_limit() -> u32 {
    Category::Music.daily_allotment()
}

fn default_app_limit() -> u32 {
    Category::App.daily_allotment()
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            image: default_image_limit(),
            video: default_video_limit(),
            music: default_music_limit(),
            app: default_app_limit(),
        }
    }
}

impl LimitsConfig {
    pub fn to_counts(&self) -> QuotaCounts {
        QuotaCounts {
            image: self.image,
            video: self.video,
            music: self.music,
            app: self.app,
        }
    }
}

impl Config {
    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path);
        }

        if let Ok(config) = Self::load_from_path("promptcraft.toml") {
            debug!("Loaded config from ./promptcraft.toml");
            return Ok(config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("promptcraft").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the anon key from the environment variable named in config
    pub fn get_anon_key(&self) -> Result<String> {
        match &self.store.anon_key_env {
            Some(env_var) => {
                if env_var.to_lowercase() == "none" {
                    return Ok(String::new());
                }
                env::var(env_var).map_err(|_| {
                    anyhow::anyhow!("Anon key not found in environment variable: {}", env_var)
                })
            }
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.provider, "supabase");
        assert_eq!(
            config.store.anon_key_env,
            Some("SUPABASE_ANON_KEY".to_string())
        );
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn test_limits_default_to_allotments() {
        let counts = LimitsConfig::default().to_counts();
        assert_eq!(counts, QuotaCounts::full());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[store]
provider = "memory"

[limits]
video = 1
"#,
        )
        .unwrap();
        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.store.user_id_env, "PROMPTCRAFT_USER_ID");
        assert_eq!(config.limits.video, 1);
        assert_eq!(config.limits.image, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("provider = \"supabase\""));
        assert!(toml_str.contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    #[serial]
    fn test_anon_key_from_env() {
        env::set_var("PROMPTCRAFT_TEST_ANON", "anon_123");
        let mut config = Config::default();
        config.store.anon_key_env = Some("PROMPTCRAFT_TEST_ANON".to_string());
        assert_eq!(config.get_anon_key().unwrap(), "anon_123");
        env::remove_var("PROMPTCRAFT_TEST_ANON");
    }

    #[test]
    fn test_anon_key_missing_fails() {
        let mut config = Config::default();
        config.store.anon_key_env = Some("PROMPTCRAFT_NONEXISTENT_ANON_XYZ".to_string());
        let err = config.get_anon_key().unwrap_err();
        assert!(err.to_string().contains("Anon key not found"));
    }

    #[test]
    fn test_anon_key_none() {
        let mut config = Config::default();
        config.store.anon_key_env = Some("none".to_string());
        assert_eq!(config.get_anon_key().unwrap(), "");
        config.store.anon_key_env = None;
        assert_eq!(config.get_anon_key().unwrap(), "");
    }
}
