use http::{Method, StatusCode};
use thiserror::Error;

use crate::auth::AuthMode;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// A non-success response, kept verbatim.
///
/// This is the cause attached to every [`ApiError`] and is also returned on its
/// own when the response body is not the API error envelope.
#[derive(Debug, Clone, Error)]
#[error("status: {}, body: {body}", status.as_u16())]
pub struct HttpError {
    pub status: StatusCode,
    pub body: String,
}

/// A structured rejection from the management API (`{"errorCode", "errorMsg"}`).
#[derive(Debug, Clone, Error)]
#[error("{error_code}: {error_message} (status {})", status.as_u16())]
pub struct ApiError {
    pub status: StatusCode,
    pub error_code: String,
    pub error_message: String,
    #[source]
    pub cause: HttpError,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

/// Failures below the HTTP layer: DNS, connect, TLS, timeouts, broken bodies.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

impl TransportError {
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            TransportError::Timeout { url }
        } else if err.is_connect() {
            TransportError::Connect {
                url,
                message: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            TransportError::Body {
                url,
                message: err.to_string(),
            }
        } else {
            TransportError::Request {
                url,
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing credential field `{field}` for {mode} authentication")]
    MissingCredentialField { mode: AuthMode, field: &'static str },

    #[error("token exchange failed: {0}")]
    TokenExchangeFailed(#[source] Box<ClientError>),

    #[error("failed to parse access token: {0}")]
    TokenParse(String),

    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("failed to encode query parameters: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),

    #[error("failed to decode response from {url}: {source}; body: {body}")]
    Deserialization {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("api error: {0}")]
    Api(#[from] ApiError),

    #[error("unexpected response: {0}")]
    Http(#[from] HttpError),

    #[error("empty response body from {method} {url} where a value was expected")]
    EmptyBody { method: Method, url: String },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("server returned page {returned} when page {requested} was requested")]
    PageOutOfOrder { requested: u32, returned: u32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid host url: {0}")]
    InvalidUrl(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfiguration(String),
}

impl ClientError {
    /// HTTP status of the failed call, when the remote answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api(err) => Some(err.status),
            ClientError::Http(err) => Some(err.status),
            ClientError::TokenExchangeFailed(inner) => inner.status(),
            _ => None,
        }
    }

    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            ClientError::TokenExchangeFailed(inner) => inner.as_api_error(),
            _ => None,
        }
    }

    /// True only for a structured API error carrying 404.
    ///
    /// A bare 404 whose body is not the error envelope does not count.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api(err) if err.is_not_found())
    }

    pub fn is_transport(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::TokenExchangeFailed(inner) => inner.is_transport(),
            _ => false,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        ClientError::InvalidArgument(message.into())
    }
}
