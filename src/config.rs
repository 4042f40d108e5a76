//! Runtime configuration.
//!
//! Every setting comes from a `NOTEPAD_*` environment variable with a default
//! pointing at the public challenge service. Values are validated once at
//! startup so the rest of the crate can treat them as trusted.

use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://challenge.surfe.com";
pub const DEFAULT_SESSION: &str = "challenge_surfe_sesh";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_MAX_CANDIDATES: usize = 10;
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the notes service, without the session segment.
    pub base_url: Url,
    /// Session key; notes live under `{base_url}/{session}/notes`.
    pub session: String,
    pub users_url: Url,
    pub debounce: Duration,
    pub max_candidates: usize,
    pub bind: SocketAddr,
    /// `None` keeps the HTTP client's default.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_raw = lookup("NOTEPAD_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_service_url("NOTEPAD_BASE_URL", &base_raw)?;

        let session = lookup("NOTEPAD_SESSION").unwrap_or_else(|| DEFAULT_SESSION.to_string());
        if session.is_empty() || session.contains('/') {
            return Err(ConfigError::InvalidValue {
                var: "NOTEPAD_SESSION",
                value: session,
            });
        }

        let users_url = match lookup("NOTEPAD_USERS_URL") {
            Some(raw) => parse_service_url("NOTEPAD_USERS_URL", &raw)?,
            None => join_path(&base_url, &["users"]),
        };

        let debounce_ms = parse_number("NOTEPAD_DEBOUNCE_MS", lookup("NOTEPAD_DEBOUNCE_MS"))?
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        let max_candidates =
            parse_number("NOTEPAD_MAX_CANDIDATES", lookup("NOTEPAD_MAX_CANDIDATES"))?
                .map(|n| n as usize)
                .unwrap_or(DEFAULT_MAX_CANDIDATES);

        let bind_raw = lookup("NOTEPAD_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                var: "NOTEPAD_BIND",
                value: bind_raw.clone(),
            })?;

        let request_timeout = parse_number(
            "NOTEPAD_REQUEST_TIMEOUT_SECS",
            lookup("NOTEPAD_REQUEST_TIMEOUT_SECS"),
        )?
        .map(Duration::from_secs);

        Ok(Self {
            base_url,
            session,
            users_url,
            debounce: Duration::from_millis(debounce_ms),
            max_candidates,
            bind,
            request_timeout,
        })
    }

    /// Defaults, with every service URL rooted at `base`. Handy for tests that
    /// point the backend at a local mock server.
    pub fn for_base_url(base: &str) -> Result<Self, ConfigError> {
        let base = base.to_string();
        Self::from_lookup(move |key| match key {
            "NOTEPAD_BASE_URL" => Some(base.clone()),
            _ => None,
        })
    }

    /// `{base}/{session}/notes`
    pub fn notes_url(&self) -> Url {
        join_path(&self.base_url, &[&self.session, "notes"])
    }

    /// `{base}/{session}/notes/{id}`
    pub fn note_url(&self, id: &str) -> Url {
        join_path(&self.base_url, &[&self.session, "notes", id])
    }
}

/// Accept only absolute http(s) URLs that name a host.
fn parse_service_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var,
        reason: e.to_string(),
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl {
            var,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl {
            var,
            reason: "no host in URL".to_string(),
        });
    }

    Ok(url)
}

/// Append path segments, percent-encoding each one.
fn join_path(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    let mut path = url.path().trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    url.set_path(&path);
    url
}

fn parse_number(var: &'static str, raw: Option<String>) -> Result<Option<u64>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
