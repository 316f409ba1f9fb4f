use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, UserSyncError};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const API_URL_ENV: &str = "USERSYNC_API_URL";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| UserSyncError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| UserSyncError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "usersync")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(UserSyncError::NoConfigDir)
    }

    /// Resolve the API base address: flag, then env var, then config file, then default.
    pub fn api_url(&self, explicit: Option<&str>) -> Result<Url> {
        let env = std::env::var(API_URL_ENV).ok();
        self.resolve_api_url(explicit, env.as_deref())
    }

    fn resolve_api_url(&self, explicit: Option<&str>, env: Option<&str>) -> Result<Url> {
        let raw = explicit
            .or(env)
            .or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL);

        Url::parse(raw).map_err(|e| UserSyncError::InvalidUrl {
            url: raw.to_string(),
            source: e,
        })
    }
}
