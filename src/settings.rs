//! Startup configuration
//!
//! Sources are layered, later ones winning: built-in defaults, an optional JSON file,
//! `IDASH_*` environment variables, then command-line flags. Settings are fixed once
//! loaded.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::constants::{defaults, envvars};
use crate::poller::ErrorPolicy;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Database root, without `.json`
    pub base_url: String,
    /// Subtree holding the latest reading; "/" is the root
    pub path: String,
    pub interval_ms: u64,
    pub window_len: usize,
    /// Optional read token sent as a query parameter
    pub token: Option<String>,
    pub on_error: ErrorPolicy,
    /// Seed both charts from the history endpoint at startup
    pub history: bool,
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            path: defaults::DATA_PATH.to_string(),
            interval_ms: defaults::POLL_INTERVAL_MS,
            window_len: defaults::WINDOW_LEN,
            token: None,
            on_error: ErrorPolicy::default(),
            history: false,
            request_timeout_ms: defaults::REQUEST_TIMEOUT.as_millis() as u64,
        }
    }
}

/// Values given on the command line
#[derive(Clone, Debug, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub path: Option<String>,
    pub interval_ms: Option<u64>,
    pub window_len: Option<usize>,
    pub token: Option<String>,
    pub on_error: Option<ErrorPolicy>,
    pub history: Option<bool>,
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(raw).map_err(Into::into)
    }
}

impl Settings {
    pub fn load(
        config_file: Option<&Path>,
        overrides: SettingsOverrides,
    ) -> Result<Self, SettingsError> {
        let mut settings = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env()?;
        settings.apply_overrides(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = raw.parse::<Settings>()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn apply_env(&mut self) -> Result<(), SettingsError> {
        if let Some(v) = env_string(envvars::BASE_URL) {
            self.base_url = v;
        }
        if let Some(v) = env_string(envvars::DATA_PATH) {
            self.path = v;
        }
        if let Some(v) = env_parse(envvars::INTERVAL_MS)? {
            self.interval_ms = v;
        }
        if let Some(v) = env_parse(envvars::WINDOW_LEN)? {
            self.window_len = v;
        }
        if let Some(v) = env_string(envvars::TOKEN) {
            self.token = Some(v);
        }
        if let Some(v) = env_parse(envvars::ON_ERROR)? {
            self.on_error = v;
        }
        if let Some(v) = env_string(envvars::HISTORY) {
            self.history = parse_bool(&v).ok_or(SettingsError::InvalidEnv {
                var: envvars::HISTORY,
                value: v,
            })?;
        }
        if let Some(v) = env_parse(envvars::REQUEST_TIMEOUT_MS)? {
            self.request_timeout_ms = v;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) {
        let SettingsOverrides {
            base_url,
            path,
            interval_ms,
            window_len,
            token,
            on_error,
            history,
        } = overrides;
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(path) = path {
            self.path = path;
        }
        self.interval_ms = interval_ms.unwrap_or(self.interval_ms);
        self.window_len = window_len.unwrap_or(self.window_len);
        self.token = token.or(self.token.take());
        self.on_error = on_error.unwrap_or(self.on_error);
        self.history = history.unwrap_or(self.history);
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.interval_ms == 0 {
            return Err(SettingsError::Invalid("interval must be at least 1 ms".into()));
        }
        if self.window_len == 0 {
            return Err(SettingsError::Invalid("window length must be at least 1".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::Invalid("request timeout must be at least 1 ms".into()));
        }
        Url::parse(self.base_url.trim()).map_err(|e| {
            SettingsError::Invalid(format!("base URL '{}': {}", self.base_url, e))
        })?;
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_string(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(var: &'static str) -> Result<Option<T>, SettingsError> {
    env_string(var)
        .map(|value| {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| SettingsError::InvalidEnv { var, value })
        })
        .transpose()
}
