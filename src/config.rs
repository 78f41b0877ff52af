//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_FILE: &str = ".authdemo/session.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the auth API, without a trailing slash.
    pub api_url: String,
    /// File backing the persistent session store.
    pub session_file: PathBuf,
    pub timeouts: HttpTimeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `AUTHDEMO_API_URL`: default `http://localhost:8000`
    /// - `AUTHDEMO_SESSION_FILE`: default `.authdemo/session.json`
    /// - `AUTHDEMO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTHDEMO_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = std::env::var("AUTHDEMO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let session_file = std::env::var("AUTHDEMO_SESSION_FILE").unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_owned());
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("AUTHDEMO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("AUTHDEMO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self { api_url: normalize_base_url(&api_url), session_file: PathBuf::from(session_file), timeouts }
    }

    /// Replace the API base URL, normalizing the trailing slash.
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
