//! Gateway configuration

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
/// Default upstream GraphQL server
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:9090";
/// Default outbound timeout in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid listen address '{value}': {source}")]
    Addr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Invalid upstream URL '{value}': {source}")]
    UpstreamUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid upstream timeout '{0}': expected a positive number of seconds")]
    Timeout(String),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address of the gateway itself
    pub addr: SocketAddr,
    /// Upstream the POST relay forwards to
    pub upstream: UpstreamConfig,
}

/// Upstream relay configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; the inbound path is appended to it
    pub base_url: String,
    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            upstream: UpstreamConfig::default(),
        }
    }
}

/// `config/gateway.toml` structure
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    addr: Option<String>,
    #[serde(default)]
    upstream: UpstreamConfig,
}

impl GatewayConfig {
    /// Load configuration.
    /// Priority: environment variables > `<config_dir>/gateway.toml` > defaults
    pub fn load(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(config_dir)?.unwrap_or_default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read `<config_dir>/gateway.toml`; `None` when the file does not exist
    pub fn from_file(config_dir: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.as_ref().join("gateway.toml");

        if !config_path.exists() {
            tracing::debug!("Gateway config file not found: {:?}", config_path);
            return Ok(None);
        }

        let path = config_path.display().to_string();
        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let file: ConfigFile =
            toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;

        let mut config = Self {
            upstream: file.upstream,
            ..Self::default()
        };
        if let Some(addr) = file.addr {
            config.addr = parse_addr(&addr)?;
        }
        config.validate()?;

        tracing::info!("Loaded gateway configuration from {:?}", config_path);
        Ok(Some(config))
    }

    /// Override fields from `TODO_GATEWAY_ADDR`, `TODO_UPSTREAM_URL` and
    /// `TODO_UPSTREAM_TIMEOUT_SECS` as returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("TODO_GATEWAY_ADDR") {
            self.addr = parse_addr(&addr)?;
        }

        if let Some(base_url) = lookup("TODO_UPSTREAM_URL") {
            self.upstream.base_url = base_url;
        }

        if let Some(timeout) = lookup("TODO_UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::Timeout(timeout.clone()))?;
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.upstream.base_url).map_err(|source| ConfigError::UpstreamUrl {
            value: self.upstream.base_url.clone(),
            source,
        })?;
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Timeout("0".to_string()));
        }
        Ok(())
    }
}

fn parse_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|source| ConfigError::Addr {
        value: value.to_string(),
        source,
    })
}
