//! Runtime configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Directory under the home directory where the session document lives.
const DATA_DIR_NAME: &str = ".servicerw";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub timeouts: HttpTimeouts,
}

impl Config {
    /// Build runtime config from environment variables.
    ///
    /// All variables are optional:
    /// - `SERVICERW_API_URL`: backend base URL, default `http://localhost:4000/api`
    /// - `SERVICERW_DATA_DIR`: session storage directory, default `~/.servicerw`
    /// - `SERVICERW_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SERVICERW_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = std::env::var("SERVICERW_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let data_dir = std::env::var("SERVICERW_DATA_DIR")
            .map_or_else(|_| default_data_dir(), PathBuf::from);

        let timeouts = HttpTimeouts {
            request_secs: env_parse("SERVICERW_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("SERVICERW_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self { api_url, data_dir, timeouts }
    }
}

/// `~/.servicerw`, or `./.servicerw` when no home directory resolves.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map_or_else(|| PathBuf::from(DATA_DIR_NAME), |home| home.join(DATA_DIR_NAME))
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
