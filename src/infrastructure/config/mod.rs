//! Application configuration.

pub mod app_config;
pub mod args;

pub use app_config::{
    AppConfig, CacheConfig, CacheMode, ConfigError, HttpConfig, LightboxConfig, LogLevel,
};
pub use args::CliArgs;
