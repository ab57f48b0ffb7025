use anyhow::{Context, Result, ensure};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tiers: TierConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default = "default_vimeo")]
    pub vimeo: ProviderConfig,
    #[serde(default = "default_youtube")]
    pub youtube: ProviderConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

/// Page-size ceiling per feature level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    #[serde(default = "default_standard_page_size")]
    pub standard_page_size: u32,
    #[serde(default = "default_extended_features_page_size")]
    pub extended_features_page_size: u32,
    #[serde(default = "default_extended_pagination_page_size")]
    pub extended_pagination_page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout for a single upstream call
    #[serde(default = "default_http_timeout", with = "duration_serde")]
    pub timeout: Duration,
    #[serde(default = "default_http_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Public base URL used to build episode enclosure links
    #[serde(default = "default_download_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key or token; the provider is not registered without one
    pub api_key: Option<String>,
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default = "default_worker_poll_interval", with = "duration_serde")]
    pub poll_interval: Duration,
    #[serde(default = "default_worker_batch_size")]
    pub batch_size: usize,
    /// Pending build jobs accepted before `add` is rejected
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_standard_page_size() -> u32 {
    DEFAULT_STANDARD_PAGE_SIZE
}

fn default_extended_features_page_size() -> u32 {
    DEFAULT_EXTENDED_FEATURES_PAGE_SIZE
}

fn default_extended_pagination_page_size() -> u32 {
    DEFAULT_EXTENDED_PAGINATION_PAGE_SIZE
}

fn parse_default_duration(value: &str) -> Duration {
    humantime::parse_duration(value).unwrap_or(Duration::from_secs(30))
}

fn default_http_timeout() -> Duration {
    parse_default_duration(DEFAULT_HTTP_TIMEOUT)
}

fn default_http_connect_timeout() -> Duration {
    parse_default_duration(DEFAULT_HTTP_CONNECT_TIMEOUT)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_download_base_url() -> String {
    DEFAULT_DOWNLOAD_BASE_URL.to_string()
}

fn default_vimeo() -> ProviderConfig {
    ProviderConfig {
        api_key: None,
        api_url: DEFAULT_VIMEO_API_URL.to_string(),
    }
}

fn default_youtube() -> ProviderConfig {
    ProviderConfig {
        api_key: None,
        api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
    }
}

fn default_worker_poll_interval() -> Duration {
    parse_default_duration(DEFAULT_WORKER_POLL_INTERVAL)
}

fn default_worker_batch_size() -> usize {
    DEFAULT_WORKER_BATCH_SIZE
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tiers: TierConfig::default(),
            http: HttpConfig::default(),
            download: DownloadConfig::default(),
            vimeo: default_vimeo(),
            youtube: default_youtube(),
            worker: WorkerConfig::default(),
        }
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            standard_page_size: default_standard_page_size(),
            extended_features_page_size: default_extended_features_page_size(),
            extended_pagination_page_size: default_extended_pagination_page_size(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_http_timeout(),
            connect_timeout: default_http_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_url: default_download_base_url(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_worker_poll_interval(),
            batch_size: default_worker_batch_size(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl ProviderConfig {
    /// Key with surrounding whitespace removed; blank keys count as unset
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    /// Defaults, then the TOML file (if present), then `VIDCAST_*` variables.
    ///
    /// Nested keys use a double underscore: `VIDCAST_VIMEO__API_KEY`.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let exists = std::path::Path::new(config_file).exists();

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("loading configuration from {config_file}"))?;

        config.validate()?;

        if exists {
            info!("Configuration loaded from: {}", config_file);
        } else {
            info!(
                "Config file {} not found, using defaults and environment",
                config_file
            );
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tiers.standard_page_size > 0
                && self.tiers.extended_features_page_size > 0
                && self.tiers.extended_pagination_page_size > 0,
            "tier page sizes must be positive"
        );
        ensure!(
            self.worker.batch_size > 0 && self.worker.queue_capacity > 0,
            "worker batch_size and queue_capacity must be positive"
        );
        ensure!(
            !self.worker.poll_interval.is_zero(),
            "worker poll_interval must be greater than zero"
        );
        ensure!(
            !self.http.timeout.is_zero() && !self.http.connect_timeout.is_zero(),
            "http timeouts must be greater than zero"
        );
        url::Url::parse(&self.download.base_url)
            .with_context(|| format!("invalid download.base_url '{}'", self.download.base_url))?;
        url::Url::parse(&self.vimeo.api_url)
            .with_context(|| format!("invalid vimeo.api_url '{}'", self.vimeo.api_url))?;
        url::Url::parse(&self.youtube.api_url)
            .with_context(|| format!("invalid youtube.api_url '{}'", self.youtube.api_url))?;
        Ok(())
    }
}
