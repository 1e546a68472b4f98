use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::query::{AccountType, PageSize, RepoVisibility, SortKey};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Default selector values applied when the CLI flag is omitted.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    pub account_type: Option<AccountType>,
    pub visibility: Option<RepoVisibility>,
    pub sort: Option<SortKey>,
    pub per_page: Option<PageSize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubConfig {
    pub token: Option<String>,
    pub url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file().unwrap_or_default();
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_from_file() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("repo_browse").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Ok(url) = env::var("GITHUB_URL") {
            self.github.url = Some(url);
        }
    }

    /// Parse config from a TOML string (for testing)
    #[cfg(test)]
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
