use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use pdftext_core::config_file::{self, ConfigFile};
use pdftext_core::SeparatorMode;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STORAGE_DIR: &str = "./uploads";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// PDF to text server - upload a PDF, download its text
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory for uploads and extracted text
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Largest accepted upload, in megabytes
    #[arg(long)]
    pub max_upload_mb: Option<u64>,

    /// Per-request extraction timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Omit the page separator after the last page
    #[arg(long)]
    pub no_trailing_separator: bool,

    /// Config file to use instead of the .pdftext.toml / platform cascade
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Fully resolved server settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub storage_dir: PathBuf,
    pub max_upload_mb: u64,
    pub extraction_timeout: Duration,
    pub separator: SeparatorMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            extraction_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            separator: SeparatorMode::Trailing,
        }
    }
}

impl Settings {
    /// Resolve from the process environment and the config file cascade.
    pub fn load(cli: &Cli) -> Self {
        let file = match &cli.config {
            Some(path) => config_file::load_from_path(path).unwrap_or_else(|| {
                tracing::warn!(path = %path.display(), "config file not loaded, using defaults");
                ConfigFile::default()
            }),
            None => config_file::load_config(),
        };
        Self::resolve(cli, &file, |key| std::env::var(key).ok())
    }

    /// Resolve configuration: CLI flags > env vars > config file > defaults.
    pub fn resolve(cli: &Cli, file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let server = file.server.clone().unwrap_or_default();
        let storage = file.storage.clone().unwrap_or_default();
        let limits = file.limits.clone().unwrap_or_default();
        let extraction = file.extraction.clone().unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or_else(|| env("PDFTEXT_HOST"))
            .or(server.host)
            .unwrap_or(defaults.host);
        let port = cli
            .port
            .or_else(|| env("PDFTEXT_PORT").and_then(|v| v.parse().ok()))
            .or(server.port)
            .unwrap_or(defaults.port);
        let storage_dir = cli
            .storage_dir
            .clone()
            .or_else(|| env("PDFTEXT_STORAGE_DIR").map(PathBuf::from))
            .or_else(|| storage.dir.map(PathBuf::from))
            .unwrap_or(defaults.storage_dir);
        let max_upload_mb = cli
            .max_upload_mb
            .or_else(|| env("PDFTEXT_MAX_UPLOAD_MB").and_then(|v| v.parse().ok()))
            .or(limits.max_upload_mb)
            .unwrap_or(defaults.max_upload_mb);
        let extraction_timeout = cli
            .timeout_secs
            .or_else(|| env("PDFTEXT_TIMEOUT_SECS").and_then(|v| v.parse().ok()))
            .or(limits.extraction_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.extraction_timeout);
        let trailing = if cli.no_trailing_separator {
            false
        } else {
            env("PDFTEXT_TRAILING_SEPARATOR")
                .and_then(|v| parse_bool(&v))
                .or(extraction.trailing_separator)
                .unwrap_or(true)
        };

        Settings {
            host,
            port,
            storage_dir,
            max_upload_mb,
            extraction_timeout,
            separator: SeparatorMode::from_trailing(trailing),
        }
    }

    /// Reject limits that would make every upload fail.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_upload_mb == 0 {
            anyhow::bail!("max upload size must be at least 1 MB");
        }
        if self.extraction_timeout.is_zero() {
            anyhow::bail!("extraction timeout must be at least 1 second");
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
