//! Application configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::args::CliArgs;
use crate::application::services::query_param::DEFAULT_QUERY_PARAM;
use crate::domain::ports::{CACHE_KEY_PREFIX, SlideEffect};

const APP_NAME: &str = "redmine-glightbox";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "sk-ys";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where resolved attachment records are cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Process memory; forgotten on exit.
    #[default]
    Memory,
    /// A file per session id, shared between runs.
    File,
}

/// HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Session cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache backend.
    #[serde(default)]
    pub mode: CacheMode,

    /// Session id used by the file backend.
    #[serde(default = "default_session_id")]
    pub session_id: String,

    /// Maximum entries held by the memory backend.
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: usize,

    /// Prefix of cache keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            mode: CacheMode::default(),
            session_id: default_session_id(),
            memory_capacity: default_memory_capacity(),
            key_prefix: default_key_prefix(),
        }
    }
}

/// Viewer behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightboxConfig {
    /// Query parameter holding the open attachment id.
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Delay before opening the attachment named in the initial URL.
    #[serde(default = "default_initial_open_delay_ms")]
    pub initial_open_delay_ms: u64,

    /// Delay before checking whether a slide image decoded.
    #[serde(default = "default_image_retry_delay_ms")]
    pub image_retry_delay_ms: u64,

    /// Extra scroll applied when bringing a thumbnail into view.
    #[serde(default = "default_scroll_margin")]
    pub thumbnail_scroll_margin: f64,

    /// Transition between slides: `fade`, `slide` or `zoom`.
    #[serde(default)]
    pub slide_effect: SlideEffect,
}

impl LightboxConfig {
    /// Initial-open delay as a duration.
    #[must_use]
    pub const fn initial_open_delay(&self) -> Duration {
        Duration::from_millis(self.initial_open_delay_ms)
    }

    /// Image retry delay as a duration.
    #[must_use]
    pub const fn image_retry_delay(&self) -> Duration {
        Duration::from_millis(self.image_retry_delay_ms)
    }
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            query_param: default_query_param(),
            initial_open_delay_ms: default_initial_open_delay_ms(),
            image_retry_delay_ms: default_image_retry_delay_ms(),
            thumbnail_scroll_margin: default_scroll_margin(),
            slide_effect: SlideEffect::default(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Root URL of the Redmine site.
    #[serde(default)]
    pub base_url: Option<String>,

    /// HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Session cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Viewer settings.
    #[serde(default)]
    pub lightbox: LightboxConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

fn default_session_id() -> String {
    "default".to_string()
}

fn default_memory_capacity() -> usize {
    512
}

fn default_key_prefix() -> String {
    CACHE_KEY_PREFIX.to_string()
}

fn default_query_param() -> String {
    DEFAULT_QUERY_PARAM.to_string()
}

fn default_initial_open_delay_ms() -> u64 {
    100
}

fn default_image_retry_delay_ms() -> u64 {
    300
}

fn default_scroll_margin() -> f64 {
    4.0
}

impl AppConfig {
    /// Loads the configuration file, then applies CLI overrides.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let path = args.config.clone().or_else(Self::default_config_path);
        let mut config = match path.as_deref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.config = path;
        config.merge_with_args(args);
        Ok(config)
    }

    /// Parses a configuration file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = args.timeout {
            self.http.timeout_secs = timeout;
        }
        if let Some(mode) = args.cache {
            self.cache.mode = mode;
        }
        if let Some(session) = &args.session {
            self.cache.session_id = session.clone();
        }
        if let Some(param) = &args.query_param {
            self.lightbox.query_param = param.clone();
        }
    }

    /// Site root as a URL with a trailing slash, if configured.
    ///
    /// # Errors
    /// Returns error if the configured value is not an absolute URL.
    pub fn base_url(&self) -> Result<Option<url::Url>, ConfigError> {
        let Some(raw) = &self.base_url else {
            return Ok(None);
        };
        let normalized = if raw.ends_with('/') {
            raw.clone()
        } else {
            format!("{raw}/")
        };
        url::Url::parse(&normalized)
            .map(Some)
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: raw.clone(),
                message: e.to_string(),
            })
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
