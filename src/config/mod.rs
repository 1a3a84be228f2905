//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP listener and public addressing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Absolute base every emitted href is joined to
    /// (e.g., "https://api.example.com/v1/")
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            base_url: "http://127.0.0.1:3000/".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Paging defaults applied to collection requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Offset used when the client omits it; `None` leaves it unset
    pub default_offset: Option<usize>,

    /// Page size used when the client omits it; `None` means unbounded
    pub default_page_size: Option<usize>,

    pub max_page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_offset: Some(0),
            default_page_size: Some(25),
            max_page_size: 10_000,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StashConfig {
    pub server: ServerConfig,
    pub paging: PagingConfig,
}

impl StashConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = Some(path.display().to_string());

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            file: file.clone(),
            message: e.to_string(),
        })?;

        Self::parse(&content, file)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<String>) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every request fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paging = &self.paging;

        if paging.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "paging.max_page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if paging
            .default_page_size
            .is_some_and(|size| size == 0 || size > paging.max_page_size)
        {
            return Err(ConfigError::InvalidValue {
                field: "paging.default_page_size".to_string(),
                message: format!("must be between 1 and {}", paging.max_page_size),
            });
        }

        url::Url::parse(&self.server.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "server.base_url".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self::default()
    }
}
