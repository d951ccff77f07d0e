use crate::fetch::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, PageFetcher};
use crate::source::HttpSourceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Missing setting '{0}' (set it in the config file or via flag/environment)")]
    MissingSetting(&'static str),
    #[error("paging.page_size must be at least 1")]
    InvalidPageSize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub paging: PagingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Tenant API root; the `get_accounts` path is appended to it.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_key_id: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingSettings {
    pub page_size: usize,
    pub max_pages: usize,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl AppConfig {
    pub fn page_fetcher(&self) -> Result<PageFetcher, ConfigError> {
        if self.paging.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(PageFetcher::new()
            .page_size(self.paging.page_size)
            .max_pages(self.paging.max_pages))
    }

    pub fn http_source_config(&self) -> Result<HttpSourceConfig, ConfigError> {
        let base_url =
            non_blank(&self.api.base_url).ok_or(ConfigError::MissingSetting("api.base_url"))?;
        let api_key =
            non_blank(&self.api.api_key).ok_or(ConfigError::MissingSetting("api.api_key"))?;

        Ok(HttpSourceConfig {
            base_url,
            api_key,
            api_key_id: non_blank(&self.api.api_key_id),
            timeout: Duration::from_secs(self.api.timeout_secs),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<AppConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static AppConfig {
    static DEFAULT_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::default);
    &DEFAULT_CONFIG
}
