/*
[INPUT]:  YAML configuration file and TASKTRACK_* environment variables
[OUTPUT]: Parsed client configuration
[POS]:    Configuration layer - API endpoint and session storage setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tasktrack_adapter::ClientConfig;
use tasktrack_adapter::auth::default_credentials_path;
use tasktrack_adapter::http::DEFAULT_BASE_URL;

/// Prefix for environment overrides, e.g. `TASKTRACK_API__BASE_URL`
pub const ENV_PREFIX: &str = "TASKTRACK";

/// Top-level configuration for the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Task API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root including any path prefix, e.g. `http://host:5001/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Where the session token is kept between runs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Keep the token on disk; when false it lives only for the process
    #[serde(default = "default_persist")]
    pub persist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist: default_persist(),
            credentials_path: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_persist() -> bool {
    true
}

/// `<config_dir>/tasktrack/config.yaml`
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("tasktrack").join("config.yaml"),
        None => PathBuf::from(".tasktrack").join("config.yaml"),
    }
}

impl AppConfig {
    /// Load configuration from a YAML file layered with environment overrides.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Yaml).required(true),
            None => File::from(default_config_path().as_path())
                .format(FileFormat::Yaml)
                .required(false),
        };

        let config: Self = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document without environment layering
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse YAML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serialize configuration to YAML")
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(self.api.base_url.trim())
            .with_context(|| format!("invalid api.base_url: {}", self.api.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api.base_url must use http or https, got {}", url.scheme());
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }
        if self.api.connect_timeout_secs == 0 {
            bail!("api.connect_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.storage
            .credentials_path
            .clone()
            .unwrap_or_else(default_credentials_path)
    }
}
