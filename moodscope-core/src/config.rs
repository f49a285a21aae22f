use crate::error::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

pub const CONFIG_PATH_VAR: &str = "MOODSCOPE_CONFIG";
pub const BACKEND_URL_VAR: &str = "MOODSCOPE_BACKEND_URL";
pub const LOG_FILTER_VAR: &str = "MOODSCOPE_LOG";
pub const DEFAULT_CONFIG_FILE: &str = "moodscope.toml";

const SCRAPE_ENDPOINT: &str = "scrape_comments";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base address of the scraping service.
    pub backend_url: String,
    /// Limit on establishing the connection only; a scrape may run as long as
    /// the backend needs.
    pub connect_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout_secs: 10,
            log_filter: "moodscope=info,moodscope_core=info,scrape_client=info,scrape_runner=info,gui=info"
                .to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file, then environment overrides.
    pub fn load() -> Result<Self, CoreError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => {
                debug!("No configuration file, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies environment-style overrides through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_VAR) {
            debug!("Backend URL overridden by {}", BACKEND_URL_VAR);
            self.backend_url = url;
        }
        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            self.log_filter = filter;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scrape_endpoint()?;
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "log_filter must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Full URL of `POST /scrape_comments` on the configured backend.
    pub fn scrape_endpoint(&self) -> Result<Url, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            field: "backend_url".to_string(),
            value: self.backend_url.clone(),
        };
        let mut base = Url::parse(&self.backend_url).map_err(|_| invalid())?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(invalid());
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(SCRAPE_ENDPOINT).map_err(|_| invalid())
    }
}
