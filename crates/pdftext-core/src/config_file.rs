use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub storage: Option<StorageConfig>,
    pub limits: Option<LimitsConfig>,
    pub extraction: Option<ExtractionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_upload_mb: Option<u64>,
    pub extraction_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub trailing_separator: Option<bool>,
}

/// Platform config directory path: `<config_dir>/pdftext/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdftext").join("config.toml"))
}

/// Load config by cascading CWD `.pdftext.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdftext.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            host: overlay
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .or_else(|| base.server.as_ref().and_then(|s| s.host.clone())),
            port: overlay
                .server
                .as_ref()
                .and_then(|s| s.port)
                .or_else(|| base.server.as_ref().and_then(|s| s.port)),
        }),
        storage: Some(StorageConfig {
            dir: overlay
                .storage
                .as_ref()
                .and_then(|s| s.dir.clone())
                .or_else(|| base.storage.as_ref().and_then(|s| s.dir.clone())),
        }),
        limits: Some(LimitsConfig {
            max_upload_mb: overlay
                .limits
                .as_ref()
                .and_then(|l| l.max_upload_mb)
                .or_else(|| base.limits.as_ref().and_then(|l| l.max_upload_mb)),
            extraction_timeout_secs: overlay
                .limits
                .as_ref()
                .and_then(|l| l.extraction_timeout_secs)
                .or_else(|| {
                    base.limits
                        .as_ref()
                        .and_then(|l| l.extraction_timeout_secs)
                }),
        }),
        extraction: Some(ExtractionConfig {
            trailing_separator: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.trailing_separator)
                .or_else(|| {
                    base.extraction
                        .as_ref()
                        .and_then(|e| e.trailing_separator)
                }),
        }),
    }
}
