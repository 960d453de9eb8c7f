use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{DirectoryError, Result};

pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

#[derive(Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| DirectoryError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| DirectoryError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "userdir")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DirectoryError::NoConfigDir)
    }

    /// Base address with env var taking precedence over the config file.
    /// The result always carries a trailing slash so endpoint paths join
    /// below it.
    pub fn base_url(&self) -> Result<Url> {
        let raw = std::env::var("USERDIR_BASE_URL")
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let normalized = format!("{}/", raw.trim_end_matches('/'));
        Url::parse(&normalized).map_err(|_| DirectoryError::InvalidBaseUrl(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test fn: the env var is process-global and tests run on parallel
    // threads, so the set/remove sequence has to stay on a single thread.
    #[test]
    fn base_url_resolution() {
        std::env::remove_var("USERDIR_BASE_URL");

        // nothing configured -> default, with trailing slash
        let config = Config::default();
        assert_eq!(config.base_url().unwrap().as_str(), "https://fakestoreapi.com/");

        // config file value gains a trailing slash
        let config = Config {
            base_url: Some("https://example.com/api".to_string()),
        };
        assert_eq!(config.base_url().unwrap().as_str(), "https://example.com/api/");

        // env var wins over the config file
        std::env::set_var("USERDIR_BASE_URL", "https://override.example.com");
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://override.example.com/"
        );
        std::env::remove_var("USERDIR_BASE_URL");

        // garbage is rejected, not silently defaulted
        let config = Config {
            base_url: Some("not a url".to_string()),
        };
        assert!(matches!(
            config.base_url(),
            Err(DirectoryError::InvalidBaseUrl(_))
        ));
    }
}
