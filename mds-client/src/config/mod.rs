use serde::Deserialize;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Host used when none is configured.
pub const DEFAULT_HOST_URL: &str = "http://localhost:8080";

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_host_url")]
    pub host_url: String,
    #[serde(default = "default_request_timeout", with = "duration_secs")]
    pub request_timeout: Duration,
    #[serde(default = "default_connect_timeout", with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Skip TLS certificate verification. Management endpoints commonly run
    /// with self-signed certificates.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

fn default_host_url() -> String {
    DEFAULT_HOST_URL.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_accept_invalid_certs() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host_url: default_host_url(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}

impl ClientConfig {
    /// Config for `host`, falling back to [`DEFAULT_HOST_URL`] when blank.
    pub fn for_host(host: &str) -> Self {
        let mut config = Self::default();
        if !host.trim().is_empty() {
            config.host_url = host.trim().to_string();
        }
        config
    }

    /// Host URL without a trailing slash; rejects anything that is not http(s).
    pub fn base_url(&self) -> Result<String> {
        let host = self.host_url.trim().trim_end_matches('/');
        let host = if host.is_empty() { DEFAULT_HOST_URL } else { host };

        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(host.to_string()));
        }
        Ok(host.to_string())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
