use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, UnwatchError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REST API root. Override for GitHub Enterprise.
    pub api_url: String,
    /// Environment variable holding the access token.
    pub token_env: String,
    /// Spinner tick interval in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            tick_rate_ms: 100,
        }
    }
}

/// ~/.config/gh-unwatch/config.toml (or the platform equivalent)
fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("gh-unwatch").join("config.toml"))
}

/// Where logs go: the explicit path, else ~/.cache/gh-unwatch/gh-unwatch.log
/// (or the platform equivalent). `None` when no cache directory exists.
pub fn log_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(dirs::cache_dir()?.join("gh-unwatch").join("gh-unwatch.log")),
    }
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit `path` must exist and parse. The default location is
    /// optional and falls back to defaults when missing or malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let content = std::fs::read_to_string(path).map_err(|e| {
                UnwatchError::Config(format!("reading {}: {}", path.display(), e))
            })?;
            return Self::parse(&content);
        }

        let Some(path) = config_path() else {
            return Ok(Config::default());
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Ok(Config::default());
        };

        match Self::parse(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Ok(Config::default())
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| UnwatchError::Config(e.to_string()))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

/// Access token, read once at startup.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn from_env(config: &Config) -> Result<Self> {
        match std::env::var(&config.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(Self {
                token: token.trim().to_string(),
            }),
            _ => Err(UnwatchError::Auth(format!("must set {}", config.token_env))),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
