//! Read-only REST access to the realtime database
//!
//! A subtree is read with `GET <base>/<path>.json`. An optional read token travels
//! as a `token` query parameter.
use std::time::Duration;

use thiserror::Error;
use ureq::tls::{TlsConfig, TlsProvider};
use ureq::Agent;
use url::Url;

use crate::constants::{defaults, keys};
use crate::data_mgmt::payload::{self, PayloadError};
use crate::data_mgmt::{HistoryEntry, Reading};
use crate::settings::Settings;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(ureq::Error),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other),
        }
    }
}

/// Build `<base>/<path>.json`, appending the token with `?` or `&` as needed
///
/// Trailing slashes on the base and surrounding slashes on the path are dropped, so
/// the root path gives `<base>/.json`.
pub fn endpoint_url(base_url: &str, path: &str, token: Option<&str>) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url.trim())?;
    let base_path = url.path().trim_end_matches('/').to_string();
    let sub_path = path.trim().trim_matches('/');
    let json_path = if sub_path.is_empty() {
        format!("{base_path}/.json")
    } else {
        format!("{base_path}/{sub_path}.json")
    };
    url.set_path(&json_path);

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        url.query_pairs_mut().append_pair(keys::TOKEN_PARAM, token);
    }
    Ok(url)
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .tls_config(TlsConfig::builder().provider(TlsProvider::NativeTls).build())
        .timeout_global(Some(timeout))
        .build()
        .into()
}

pub struct RtdbClient {
    agent: Agent,
    latest_url: Url,
    history_url: Url,
}

impl RtdbClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let token = settings.token.as_deref();
        Ok(Self {
            agent: build_agent(settings.request_timeout()),
            latest_url: endpoint_url(&settings.base_url, &settings.path, token)?,
            history_url: endpoint_url(&settings.base_url, defaults::HISTORY_PATH, token)?,
        })
    }

    pub fn fetch_latest(&self) -> Result<Reading, FetchError> {
        let body = self.get(&self.latest_url)?;
        Ok(payload::reading_from_str(&body)?)
    }

    pub fn fetch_history(&self) -> Result<Vec<HistoryEntry>, FetchError> {
        let body = self.get(&self.history_url)?;
        Ok(payload::history_from_str(&body)?)
    }

    fn get(&self, url: &Url) -> Result<String, FetchError> {
        // Path only; the query string may carry the token
        log::trace!("GET {}", url.path());
        let mut resp = self
            .agent
            .get(url.as_str())
            .header("Cache-Control", "no-store")
            .call()?;
        Ok(resp.body_mut().read_to_string()?)
    }
}
