use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, UsersError};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| UsersError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| UsersError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "users")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(UsersError::NoConfigDir)
    }

    /// Get the API base URL with env var taking precedence over config file
    pub fn base_url(&self) -> Result<Url> {
        let env = std::env::var("USERS_API_URL").ok();
        self.resolve_base_url(env.as_deref())
    }

    fn resolve_base_url(&self, env: Option<&str>) -> Result<Url> {
        let raw = env
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);

        Url::parse(raw).map_err(|_| UsersError::InvalidUrl(raw.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults() {
        let config = Config::default();
        let url = config.resolve_base_url(None).unwrap();
        assert_eq!(url.as_str(), "https://jsonplaceholder.typicode.com/");
    }

    #[test]
    fn test_base_url_env_wins_over_file() {
        let config: Config = toml::from_str(r#"base_url = "https://file.example""#).unwrap();
        let url = config
            .resolve_base_url(Some("https://env.example/api/"))
            .unwrap();
        assert_eq!(url.as_str(), "https://env.example/api/");
    }

    #[test]
    fn test_base_url_invalid() {
        let config: Config = toml::from_str(r#"base_url = "not a url""#).unwrap();
        let err = config.resolve_base_url(None).unwrap_err();
        assert!(matches!(err, UsersError::InvalidUrl(ref raw) if raw == "not a url"));
    }

    #[test]
    fn test_timeout() {
        assert_eq!(Config::default().timeout(), Duration::from_secs(10));
        let config: Config = toml::from_str("timeout_secs = 3").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
