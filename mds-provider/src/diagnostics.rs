use mds_client::ClientError;
use mds_client::error::TransportError;
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;

use crate::error::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// What an operator should look at first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The configuration or desired state is wrong.
    InvalidInput,
    /// The remote system answered, but refused or misbehaved.
    RemoteRejected,
    /// The remote system could not be reached.
    Unreachable,
    /// The remote system did not finish in time.
    Timeout,
    Internal,
}

/// An error as reported back to the host: a short summary plus the full cause chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, err: &ProviderError) -> Self {
        Self {
            severity: Severity::Error,
            category: err.category(),
            summary: summary.into(),
            detail: error_chain(err),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            category: Category::Internal,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

impl StdError for Diagnostic {}

impl ProviderError {
    pub fn category(&self) -> Category {
        match self {
            ProviderError::Client(err) => client_category(err),
            ProviderError::CreatedEntityNotFound { .. }
            | ProviderError::ReconciliationFailed { .. } => Category::RemoteRejected,
            ProviderError::ReconciliationTimeout { .. } => Category::Timeout,
            ProviderError::Configuration(_)
            | ProviderError::MissingSetting { .. }
            | ProviderError::InvalidSetting { .. } => Category::InvalidInput,
        }
    }
}

fn client_category(err: &ClientError) -> Category {
    match err {
        ClientError::MissingCredentialField { .. }
        | ClientError::InvalidArgument(_)
        | ClientError::InvalidUrl(_)
        | ClientError::InvalidConfiguration(_) => Category::InvalidInput,
        ClientError::TokenExchangeFailed(inner) => client_category(inner),
        ClientError::Transport(TransportError::Timeout { .. }) => Category::Timeout,
        ClientError::Transport(_) => Category::Unreachable,
        ClientError::Api(_)
        | ClientError::Http(_)
        | ClientError::EmptyBody { .. }
        | ClientError::Deserialization { .. }
        | ClientError::PageOutOfOrder { .. }
        | ClientError::TokenParse(_) => Category::RemoteRejected,
        ClientError::Serialization(_) | ClientError::QueryEncoding(_) => Category::Internal,
    }
}

/// The error's message followed by each cause not already contained in it.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str("\ncaused by: ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use mds_client::http::StatusCode;
    use mds_client::{ApiError, HttpError};

    #[test]
    fn test_structured_rejection_keeps_code_and_body() {
        let err = ProviderError::from(ClientError::from(ApiError {
            status: StatusCode::CONFLICT,
            error_code: "DUPLICATE_NAME".to_string(),
            error_message: "cluster name in use".to_string(),
            cause: HttpError {
                status: StatusCode::CONFLICT,
                body: "{\"errorCode\":\"DUPLICATE_NAME\"}".to_string(),
            },
        }));

        let diagnostic = Diagnostic::error("Unable to create cluster", &err);

        assert_eq!(diagnostic.category, Category::RemoteRejected);
        assert!(diagnostic.detail.contains("DUPLICATE_NAME: cluster name in use"));
        assert!(diagnostic.detail.contains("status: 409"));
    }

    #[test]
    fn test_categories_separate_input_remote_and_network() {
        let input = ProviderError::from(ClientError::InvalidArgument("id".to_string()));
        let unreachable = ProviderError::from(ClientError::from(TransportError::Connect {
            url: "https://mds.test".to_string(),
            message: "refused".to_string(),
        }));
        let timeout = ProviderError::ReconciliationTimeout {
            kind: "cluster",
            id: "c-1".to_string(),
            target: "READY".to_string(),
            elapsed: std::time::Duration::from_secs(60),
            attempts: 6,
            last_status: "PROVISIONING".to_string(),
        };

        assert_eq!(input.category(), Category::InvalidInput);
        assert_eq!(unreachable.category(), Category::Unreachable);
        assert_eq!(timeout.category(), Category::Timeout);
    }

    #[test]
    fn test_failed_token_exchange_is_classified_by_cause() {
        let err = ProviderError::from(ClientError::TokenExchangeFailed(Box::new(
            ClientError::from(TransportError::Timeout {
                url: "https://mds.test".to_string(),
            }),
        )));
        assert_eq!(err.category(), Category::Timeout);
    }
}
