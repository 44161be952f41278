use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// `limit` query parameter for `/songs/{mood}`.
    #[serde(default = "default_song_limit")]
    pub song_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub stale_responses: StaleResponsePolicy,
}

/// What the mood selector does with a song list that settles after a newer
/// request was already issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Whichever response settles last is displayed, even if it belongs to
    /// an earlier selection.
    #[default]
    LastSettledWins,
    /// Responses older than the newest issued request are dropped.
    DiscardStale,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            song_limit: default_song_limit(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl WeatherConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_song_limit() -> usize {
    10
}

fn default_poll_interval_secs() -> u64 {
    5 * 60
}

impl Config {
    /// Load from the platform config path, writing defaults on first run.
    /// `MOODTUNES_BACKEND_URL` overrides the stored base URL.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env();
        Ok(config)
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_env(&mut self) {
        if let Some(url) = platform::backend_url_override() {
            self.backend.base_url = url;
        }
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.song_limit, 10);
        assert_eq!(config.weather.poll_interval(), Duration::from_secs(300));
        assert_eq!(
            config.selector.stale_responses,
            StaleResponsePolicy::LastSettledWins
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "http://10.0.0.5:9000"

            [selector]
            stale_responses = "discard_stale"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert_eq!(config.weather.poll_interval_secs, 300);
        assert_eq!(
            config.selector.stale_responses,
            StaleResponsePolicy::DiscardStale
        );
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.backend.song_limit, 10);

        let mut edited = config.clone();
        edited.weather.poll_interval_secs = 60;
        edited.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.weather.poll_interval_secs, 60);
    }

    // The only test touching the process environment, so it owns the variable.
    #[test]
    fn test_env_overrides_backend_url() {
        let file_url = "http://from-file:8000";
        let fresh = || {
            let mut c = Config::default();
            c.backend.base_url = file_url.to_string();
            c
        };

        std::env::set_var(platform::BACKEND_URL_ENV, " http://from-env:9000 ");
        let mut config = fresh();
        config.apply_env();
        assert_eq!(config.backend.base_url, "http://from-env:9000");

        std::env::set_var(platform::BACKEND_URL_ENV, "   ");
        let mut config = fresh();
        config.apply_env();
        assert_eq!(config.backend.base_url, file_url);

        std::env::remove_var(platform::BACKEND_URL_ENV);
        let mut config = fresh();
        config.apply_env();
        assert_eq!(config.backend.base_url, file_url);
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let mut config = Config::default();
        config.backend.request_timeout_secs = 0;
        config.weather.poll_interval_secs = 0;
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(1));
        assert_eq!(config.weather.poll_interval(), Duration::from_secs(1));
    }
}
