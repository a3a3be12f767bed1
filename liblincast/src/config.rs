//! Configuration management for Lincast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ApiError, ConfigError, Result};
use crate::types::Credential;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub linkedin: LinkedInConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInConfig {
    /// Path to the file holding the OAuth access token
    pub token_file: String,
    /// Override for the API base URL (tests, proxies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Write configuration to a specific path, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        std::fs::write(path, content).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            linkedin: LinkedInConfig {
                token_file: "~/.config/lincast/linkedin.token".to_string(),
                api_base: None,
            },
        }
    }

    /// Read the access token from the configured token file.
    ///
    /// The token is trimmed of surrounding whitespace. A missing,
    /// unreadable, or empty token file means no credential is configured;
    /// callers report that to the user before any network call.
    pub fn read_access_token(&self) -> Result<Credential> {
        let token_path = shellexpand::full(&self.linkedin.token_file).map_err(|e| {
            tracing::debug!("failed to expand token file path: {}", e);
            ApiError::CredentialMissing
        })?;

        let token = std::fs::read_to_string(token_path.as_ref())
            .map_err(|e| {
                tracing::debug!("failed to read token file: {}", e);
                ApiError::CredentialMissing
            })?
            .trim()
            .to_string();

        if token.is_empty() {
            return Err(ApiError::CredentialMissing.into());
        }

        Ok(Credential::new(token))
    }

    /// Expanded path of the token file
    pub fn token_path(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.linkedin.token_file)
            .map_err(|e| ConfigError::MissingField(format!("token_file ({})", e)))?;
        Ok(PathBuf::from(expanded.to_string()))
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("LINCAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("lincast").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("lincast"))
}
