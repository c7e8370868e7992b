//! Read-only configuration file for board-scraper.
//!
//! Looked up at `./board-scraper.ron` unless `--config` names a file. Nothing
//! is ever written back.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use board_engine::{ServiceSettings, DEFAULT_SERVICE_URL};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_CONFIG_FILENAME: &str = "board-scraper.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub service_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_file: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        let service = ServiceSettings::default();
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            connect_timeout_secs: service.connect_timeout.as_secs(),
            request_timeout_secs: service.request_timeout.as_secs(),
            log_file: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid service url {url:?}: {source}")]
    InvalidServiceUrl {
        url: String,
        source: url::ParseError,
    },
}

/// A config together with the file it came from, `None` for built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: FileConfig,
    pub path: Option<PathBuf>,
}

/// Loads the config file. An explicit path must exist; the default file is
/// optional and falls back to defaults when absent.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(LoadedConfig {
                config: FileConfig::default(),
                path: None,
            });
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok(LoadedConfig {
        config,
        path: Some(path),
    })
}

impl FileConfig {
    /// Service settings, with `--service-url` taking precedence over the file.
    pub fn service_settings(&self, override_url: Option<&Url>) -> Result<ServiceSettings, ConfigError> {
        let base_url = match override_url {
            Some(url) => url.clone(),
            None => Url::parse(&self.service_url).map_err(|source| {
                ConfigError::InvalidServiceUrl {
                    url: self.service_url.clone(),
                    source,
                }
            })?,
        };

        Ok(ServiceSettings {
            base_url,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("scraper.ron");
        fs::write(&path, "(service_url: \"http://scraper.internal:9000\", log_file: true)").unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));

        let config = loaded.config;
        assert_eq!(config.service_url, "http://scraper.internal:9000");
        assert!(config.log_file);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = load(Some(&temp.path().join("nope.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(service_url: ").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn cli_url_overrides_file_url() {
        let config = FileConfig {
            request_timeout_secs: 5,
            ..FileConfig::default()
        };
        let override_url = Url::parse("http://127.0.0.1:8123/").unwrap();

        let settings = config.service_settings(Some(&override_url)).unwrap();

        assert_eq!(settings.base_url, override_url);
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_file_url_is_reported() {
        let config = FileConfig {
            service_url: "not a url".to_string(),
            ..FileConfig::default()
        };
        assert!(matches!(
            config.service_settings(None),
            Err(ConfigError::InvalidServiceUrl { .. })
        ));
    }
}
