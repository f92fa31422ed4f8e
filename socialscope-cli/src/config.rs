//! CLI configuration file and settings resolution.
//!
//! Precedence, lowest to highest: built-in defaults, the JSON config file,
//! environment variables, command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use socialscope_client::ClientConfig;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "SOCIALSCOPE_API_KEY";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "SOCIALSCOPE_BASE_URL";

/// Errors reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// IO error.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for this schema.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Refused to overwrite an existing file.
    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// No API key in flags, environment, or file.
    #[error("No API key configured; pass --api-key, set SOCIALSCOPE_API_KEY, or add api_key to the config file")]
    MissingApiKey,
}

/// Contents of `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay_ms: Option<u64>,
}

impl FileConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("socialscope")
            .join("config.json")
    }

    /// Loads configuration from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Writes the configuration, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let io_err = |source: std::io::Error| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            ConfigFileError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, content).map_err(io_err)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Writes a template file, refusing to overwrite.
    pub fn init_at(path: &Path) -> Result<Self, ConfigFileError> {
        if path.exists() {
            return Err(ConfigFileError::AlreadyExists(path.to_path_buf()));
        }
        let template = Self {
            api_key: Some("sk_your_key_here".to_string()),
            base_url: Some(socialscope_client::DEFAULT_BASE_URL.to_string()),
            timeout_ms: Some(socialscope_client::DEFAULT_TIMEOUT_MS),
            max_retries: Some(socialscope_client::DEFAULT_MAX_RETRIES),
            retry_delay_ms: Some(socialscope_client::DEFAULT_RETRY_DELAY_MS),
        };
        template.save_to(path)?;
        Ok(template)
    }

    /// Returns a copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_deref().map(mask_key),
            ..self.clone()
        }
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub max_retries: Option<u32>,
}

/// Merges flags, environment, and file into a validated client config.
///
/// `env` looks up an environment variable; empty values count as unset.
pub fn resolve(
    overrides: &Overrides,
    file: &FileConfig,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientConfig> {
    let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    let api_key = overrides
        .api_key
        .clone()
        .or_else(|| env(ENV_API_KEY))
        .or_else(|| file.api_key.clone())
        .ok_or(ConfigFileError::MissingApiKey)?;

    let mut builder = ClientConfig::builder(api_key);
    if let Some(base_url) = overrides
        .base_url
        .clone()
        .or_else(|| env(ENV_BASE_URL))
        .or_else(|| file.base_url.clone())
    {
        builder = builder.base_url(base_url);
    }
    if let Some(timeout_ms) = overrides.timeout_ms.or(file.timeout_ms) {
        builder = builder.timeout_ms(timeout_ms);
    }
    if let Some(max_retries) = overrides.max_retries.or(file.max_retries) {
        builder = builder.max_retries(max_retries);
    }
    if let Some(retry_delay_ms) = file.retry_delay_ms {
        builder = builder.retry_delay_ms(retry_delay_ms);
    }

    Ok(builder.build()?)
}

// ============================================================================
// Tests
// ============================================================================
