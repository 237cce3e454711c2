use super::app_config::{CacheMode, LogLevel};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "redmine-glightbox",
    version,
    about = "Lists the attachments a Redmine page would show in its lightbox",
    long_about = None
)]
pub struct CliArgs {
    /// Page to scan: an absolute URL, or a path relative to --base-url.
    #[arg(value_name = "PAGE")]
    pub page: String,

    /// Open this attachment id and report the resulting address-bar URL.
    #[arg(long, value_name = "ID")]
    pub open: Option<u64>,

    /// Root URL of the Redmine site.
    #[arg(long, env = "REDMINE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Session cache backend.
    #[arg(long, value_enum)]
    pub cache: Option<CacheMode>,

    /// Session id for the file cache backend.
    #[arg(long)]
    pub session: Option<String>,

    /// Query parameter holding the open attachment id.
    #[arg(long)]
    pub query_param: Option<String>,
}
