use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use todo_protocol::ClientConfig;
use todo_view::SyncOptions;

/// Gateway the CLI talks to when nothing else is configured
pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub use_template: bool,
    #[serde(default)]
    pub full_reload_on_toggle: bool,
}

impl Config {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path(),
        };
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::debug!("Loaded CLI configuration from {:?}", path);
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todo-sync")
            .join("config.toml")
    }

    /// Transport settings; `url` (flag or `TODO_URL`) wins over the file
    pub fn client_config(&self, url: Option<&str>) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            base_url: url
                .or(self.url.as_deref())
                .unwrap_or(DEFAULT_URL)
                .to_string(),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            ..defaults
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            use_template: self.use_template,
            full_reload_on_toggle: self.full_reload_on_toggle,
        }
    }
}
