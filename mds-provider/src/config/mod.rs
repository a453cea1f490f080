use config::{Config, Environment};
use mds_client::{AuthMode, ClientConfig, Credential};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{ProviderError, Result};
use crate::reconcile::PollPolicy;

pub const ENV_PREFIX: &str = "MDS";

/// Settings the provider needs before it can build a client.
///
/// Environment variables (`MDS_HOST`, `MDS_AUTH_TYPE`, `MDS_API_TOKEN`,
/// `MDS_CLIENT_ID`, `MDS_CLIENT_SECRET`, `MDS_ORG_ID`, `MDS_USERNAME`,
/// `MDS_PASSWORD`, `MDS_POLL__INTERVAL_SECS`, ...) form the base layer;
/// values supplied by the host through [`ProviderOverrides`] win.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub host: String,
    pub auth_type: Option<String>,
    pub api_token: Option<Secret<String>>,
    pub client_id: String,
    pub client_secret: Option<Secret<String>>,
    pub org_id: String,
    pub username: String,
    pub password: Option<Secret<String>>,
    pub accept_invalid_certs: Option<bool>,
    pub request_timeout_secs: Option<u64>,
    pub poll: PollSettings,
}

/// Values configured explicitly by the host.
#[derive(Debug, Clone, Default)]
pub struct ProviderOverrides {
    pub host: Option<String>,
    pub auth_type: Option<String>,
    pub api_token: Option<Secret<String>>,
    pub client_id: Option<String>,
    pub client_secret: Option<Secret<String>>,
    pub org_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub interval_secs: u64,
    pub cluster_create_timeout_secs: u64,
    pub cluster_delete_timeout_secs: u64,
    pub data_plane_create_timeout_secs: u64,
    pub data_plane_delete_timeout_secs: u64,
    pub user_create_timeout_secs: u64,
    pub max_attempts: Option<u32>,
    /// Status a new data plane reports once usable.
    pub data_plane_ready_status: String,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            cluster_create_timeout_secs: 30 * 60,
            cluster_delete_timeout_secs: 30 * 60,
            data_plane_create_timeout_secs: 30 * 60,
            data_plane_delete_timeout_secs: 30 * 60,
            user_create_timeout_secs: 2 * 60,
            max_attempts: None,
            data_plane_ready_status: "READY".to_string(),
        }
    }
}

impl PollSettings {
    fn policy(&self, timeout_secs: u64) -> PollPolicy {
        let policy = PollPolicy::fixed(
            Duration::from_secs(self.interval_secs),
            Duration::from_secs(timeout_secs),
        );
        match self.max_attempts {
            Some(max) => policy.with_max_attempts(max),
            None => policy,
        }
    }

    pub fn cluster_create(&self) -> PollPolicy {
        self.policy(self.cluster_create_timeout_secs)
    }

    pub fn cluster_delete(&self) -> PollPolicy {
        self.policy(self.cluster_delete_timeout_secs)
    }

    pub fn data_plane_create(&self) -> PollPolicy {
        self.policy(self.data_plane_create_timeout_secs)
    }

    pub fn data_plane_delete(&self) -> PollPolicy {
        self.policy(self.data_plane_delete_timeout_secs)
    }

    pub fn user_create(&self) -> PollPolicy {
        self.policy(self.user_create_timeout_secs)
    }
}

impl ProviderSettings {
    /// Loads `.env` if present, then the `MDS_` environment, then applies `overrides`.
    pub fn load(overrides: &ProviderOverrides) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_environment(environment(), overrides)
    }

    pub fn from_environment(environment: Environment, overrides: &ProviderOverrides) -> Result<Self> {
        let settings: ProviderSettings = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(settings.with_overrides(overrides))
    }

    /// Applies explicit values. Credential fields are taken only for the
    /// selected authentication type; the rest stay as the environment set them.
    pub fn with_overrides(mut self, overrides: &ProviderOverrides) -> Self {
        if let Some(host) = non_blank(&overrides.host) {
            self.host = host;
        }
        if let Some(auth_type) = non_blank(&overrides.auth_type) {
            self.auth_type = Some(auth_type);
        }

        match self.auth_mode() {
            Ok(AuthMode::ApiToken) => {
                if overrides.api_token.is_some() {
                    self.api_token = overrides.api_token.clone();
                }
            }
            Ok(AuthMode::ClientCredentials) => {
                if let Some(client_id) = overrides.client_id.clone() {
                    self.client_id = client_id;
                }
                if overrides.client_secret.is_some() {
                    self.client_secret = overrides.client_secret.clone();
                }
                if let Some(org_id) = overrides.org_id.clone() {
                    self.org_id = org_id;
                }
            }
            Ok(AuthMode::UserCredentials) => {
                if let Some(username) = overrides.username.clone() {
                    self.username = username;
                }
                if overrides.password.is_some() {
                    self.password = overrides.password.clone();
                }
                if let Some(org_id) = overrides.org_id.clone() {
                    self.org_id = org_id;
                }
            }
            Err(_) => {}
        }
        self
    }

    pub fn auth_mode(&self) -> Result<AuthMode> {
        let auth_type = self
            .auth_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ProviderError::MissingSetting {
                field: "auth_type",
                env_var: "MDS_AUTH_TYPE",
            })?;

        auth_type
            .parse()
            .map_err(|_| ProviderError::InvalidSetting {
                field: "auth_type",
                message: format!(
                    "'{}' is not one of api_token, client_credentials, user_credentials",
                    auth_type
                ),
            })
    }

    /// The credential for the selected mode. Reports the first missing
    /// setting by name; makes no network calls.
    pub fn credential(&self) -> Result<Credential> {
        if self.host.trim().is_empty() {
            return Err(ProviderError::MissingSetting {
                field: "host",
                env_var: "MDS_HOST",
            });
        }

        match self.auth_mode()? {
            AuthMode::ApiToken => {
                let api_token = secret(&self.api_token, "api_token", "MDS_API_TOKEN")?;
                Ok(Credential::api_token(api_token))
            }
            AuthMode::ClientCredentials => {
                let client_id = plain(&self.client_id, "client_id", "MDS_CLIENT_ID")?;
                let client_secret =
                    secret(&self.client_secret, "client_secret", "MDS_CLIENT_SECRET")?;
                let org_id = plain(&self.org_id, "org_id", "MDS_ORG_ID")?;
                Ok(Credential::client_credentials(client_id, client_secret, org_id))
            }
            AuthMode::UserCredentials => {
                let username = plain(&self.username, "username", "MDS_USERNAME")?;
                let password = secret(&self.password, "password", "MDS_PASSWORD")?;
                let org_id = plain(&self.org_id, "org_id", "MDS_ORG_ID")?;
                Ok(Credential::user_credentials(username, password, org_id))
            }
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::for_host(&self.host);
        if let Some(accept_invalid_certs) = self.accept_invalid_certs {
            config.accept_invalid_certs = accept_invalid_certs;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn plain(value: &str, field: &'static str, env_var: &'static str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(ProviderError::MissingSetting { field, env_var });
    }
    Ok(value.to_string())
}

fn secret(
    value: &Option<Secret<String>>,
    field: &'static str,
    env_var: &'static str,
) -> Result<String> {
    value
        .as_ref()
        .map(|secret| secret.expose_secret().to_string())
        .filter(|secret| !secret.is_empty())
        .ok_or(ProviderError::MissingSetting { field, env_var })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(source))
    }

    #[test]
    fn test_environment_supplies_everything() {
        let settings = ProviderSettings::from_environment(
            env_of(&[
                ("MDS_HOST", "https://mds.test"),
                ("MDS_AUTH_TYPE", "client_credentials"),
                ("MDS_CLIENT_ID", "id-1"),
                ("MDS_CLIENT_SECRET", "s3cret"),
                ("MDS_ORG_ID", "org-1"),
                ("MDS_POLL__INTERVAL_SECS", "5"),
            ]),
            &ProviderOverrides::default(),
        )
        .unwrap();

        let credential = settings.credential().unwrap();
        assert_eq!(credential.mode(), AuthMode::ClientCredentials);
        assert_eq!(credential.org_id(), Some("org-1"));
        assert_eq!(settings.poll.interval_secs, 5);
        assert_eq!(settings.poll.user_create_timeout_secs, 120);
    }

    #[test]
    fn test_overrides_only_touch_the_selected_mode() {
        let overrides = ProviderOverrides {
            auth_type: Some("api_token".to_string()),
            api_token: Some(Secret::new("explicit-token".to_string())),
            client_id: Some("explicit-client".to_string()),
            ..Default::default()
        };

        let settings = ProviderSettings::from_environment(
            env_of(&[
                ("MDS_HOST", "https://mds.test"),
                ("MDS_API_TOKEN", "env-token"),
                ("MDS_CLIENT_ID", "env-client"),
            ]),
            &overrides,
        )
        .unwrap();

        assert_eq!(
            settings.api_token.as_ref().unwrap().expose_secret(),
            "explicit-token"
        );
        assert_eq!(settings.client_id, "env-client");
    }

    #[test]
    fn test_missing_host_is_reported_first() {
        let settings = ProviderSettings {
            auth_type: Some("api_token".to_string()),
            ..Default::default()
        };

        let err = settings.credential().unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MissingSetting { field: "host", env_var: "MDS_HOST" }
        ));
    }

    #[test]
    fn test_missing_credential_field_is_named() {
        let settings = ProviderSettings {
            host: "https://mds.test".to_string(),
            auth_type: Some("user_credentials".to_string()),
            username: "dev@x.io".to_string(),
            ..Default::default()
        };

        let err = settings.credential().unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MissingSetting { field: "password", .. }
        ));
        assert!(err.to_string().contains("MDS_PASSWORD"));
    }

    #[test]
    fn test_unknown_auth_type() {
        let settings = ProviderSettings {
            host: "https://mds.test".to_string(),
            auth_type: Some("kerberos".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            settings.credential().unwrap_err(),
            ProviderError::InvalidSetting { field: "auth_type", .. }
        ));
    }

    #[test]
    fn test_client_config_carries_overrides() {
        let settings = ProviderSettings {
            host: "https://mds.test/".to_string(),
            accept_invalid_certs: Some(false),
            request_timeout_secs: Some(90),
            ..Default::default()
        };

        let config = settings.client_config();
        assert_eq!(config.base_url().unwrap(), "https://mds.test");
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.request_timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_poll_settings_build_policies() {
        let poll = PollSettings {
            max_attempts: Some(4),
            ..Default::default()
        };

        let policy = poll.cluster_create();
        assert_eq!(policy.timeout, Duration::from_secs(1800));
        assert_eq!(policy.interval(0), Duration::from_secs(10));
        assert_eq!(policy.max_attempts, Some(4));
        assert_eq!(poll.user_create().timeout, Duration::from_secs(120));
    }
}
