//! Client settings: defaults, then `catalog.toml`, then environment.
//! Binaries layer their CLI flags on top of the result.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::presentation::DEFAULT_TITLE_MAX_LEN;

pub const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_SETTINGS_FILE: &str = "catalog.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid catalog endpoint '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("invalid value '{value}' for {key}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint_url: Url,
    pub title_max_len: usize,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url"),
            title_max_len: DEFAULT_TITLE_MAX_LEN,
            request_timeout: None,
        }
    }
}

impl Settings {
    pub fn with_endpoint(mut self, raw: &str) -> Result<Self, SettingsError> {
        self.endpoint_url = parse_endpoint(raw)?;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    endpoint_url: Option<String>,
    title_max_len: Option<usize>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), |key| {
        std::env::var(key).ok()
    })
}

/// A missing settings file is not an error. `env` is the variable lookup,
/// normally `std::env::var`.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if let Some(v) = file_cfg.endpoint_url {
                settings.endpoint_url = parse_endpoint(&v)?;
            }
            if let Some(v) = file_cfg.title_max_len {
                settings.title_max_len = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout = Some(Duration::from_secs(v));
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    if let Some(v) = non_empty(env("CATALOG_ENDPOINT")) {
        settings.endpoint_url = parse_endpoint(&v)?;
    }
    if let Some(v) = non_empty(env("APP__CATALOG_ENDPOINT")) {
        settings.endpoint_url = parse_endpoint(&v)?;
    }
    if let Some(v) = non_empty(env("APP__TITLE_MAX_LEN")) {
        settings.title_max_len = parse_number("APP__TITLE_MAX_LEN", &v)?;
    }
    if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_SECS")) {
        let secs: u64 = parse_number("APP__REQUEST_TIMEOUT_SECS", &v)?;
        settings.request_timeout = Some(Duration::from_secs(secs));
    }

    Ok(settings)
}

pub fn parse_endpoint(raw: &str) -> Result<Url, SettingsError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|err| SettingsError::InvalidEndpoint {
        value: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SettingsError::InvalidEndpoint {
            value: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
