use mds_client::ClientError;
use mds_client::utils::PartialPages;
use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{kind} '{key}' was accepted but could not be found afterwards")]
    CreatedEntityNotFound { kind: &'static str, key: String },

    #[error(
        "{kind} '{id}' did not become {target} within {elapsed:?} after {attempts} poll(s); last status: {last_status}"
    )]
    ReconciliationTimeout {
        kind: &'static str,
        id: String,
        target: String,
        elapsed: Duration,
        attempts: u32,
        last_status: String,
    },

    #[error("{kind} '{id}' reported terminal status {status}")]
    ReconciliationFailed {
        kind: &'static str,
        id: String,
        status: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("missing setting `{field}`: set it in the provider configuration or via {env_var}")]
    MissingSetting {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("invalid setting `{field}`: {message}")]
    InvalidSetting { field: &'static str, message: String },
}

impl<T> From<PartialPages<T, ClientError>> for ProviderError {
    fn from(partial: PartialPages<T, ClientError>) -> Self {
        ProviderError::Client(partial.source)
    }
}

impl ProviderError {
    pub fn as_client_error(&self) -> Option<&ClientError> {
        match self {
            ProviderError::Client(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.as_client_error().is_some_and(ClientError::is_not_found)
    }
}
