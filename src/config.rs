
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug)]
pub enum ConfigError {
    UrlParseFailure(String),
    LogSetupFailure(String),
}

/// Everything a backfill run needs to know, handed down from `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub csv_path: PathBuf,
    pub log_path: PathBuf,
    pub endpoint_url: String,
    pub bearer_token: String,
}

impl Config {
    pub fn new(
        csv_path: impl Into<PathBuf>,
        log_path: impl Into<PathBuf>,
        endpoint_url: &str,
        bearer_token: &str,
    ) -> Result<Config, ConfigError> {
        let endpoint = Url::parse(endpoint_url).map_err(|e| {
            ConfigError::UrlParseFailure(format!("Endpoint may not be valid url:\n{:?}", e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ConfigError::UrlParseFailure(format!(
                "Endpoint is a cannot-be-a-base url: {}",
                endpoint_url
            )));
        }
        Ok(Config {
            csv_path: csv_path.into(),
            log_path: log_path.into(),
            endpoint_url: endpoint.as_str().to_string(),
            bearer_token: String::from(bearer_token),
        })
    }
}

pub fn open_log_file(log_path: &Path) -> Result<File, ConfigError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| {
            ConfigError::LogSetupFailure(format!(
                "Failed to open log file {}:\n{:?}",
                log_path.display(),
                e
            ))
        })
}
