use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

use super::http::{HttpRequest, Transport};
use crate::auth::{self, Credential};
use crate::error::{ApiError, ClientError, HttpError, Result};

/// Header carrying the bearer token on authenticated calls.
pub const AUTH_HEADER: &str = "csp-auth-token";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Authenticated context shared by every endpoint client of one [`crate::MdsClient`].
///
/// The token and org id are written only by the auth flow. Readers take the
/// read side of the lock for the duration of building one request.
pub struct Session {
    host_url: String,
    credential: Credential,
    token: RwLock<Option<Secret<String>>>,
    org_id: RwLock<String>,
    transport: Arc<dyn Transport>,
    refresh: Mutex<()>,
    generation: AtomicU64,
}

impl Session {
    /// A session that has not authenticated yet. See [`Session::authenticate`].
    pub fn new(host_url: String, credential: Credential, transport: Arc<dyn Transport>) -> Self {
        Self {
            host_url,
            credential,
            token: RwLock::new(None),
            org_id: RwLock::new(String::new()),
            transport,
            refresh: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Root URL of one API area: `{host}/api/{area}`.
    pub fn endpoint(&self, area: &str) -> String {
        format!("{}/api/{}", self.host_url, area)
    }

    pub async fn org_id(&self) -> String {
        self.org_id.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Runs the token exchange and stores the result.
    pub async fn authenticate(&self) -> Result<()> {
        let _guard = self.refresh.lock().await;
        self.exchange_token().await
    }

    /// Re-runs the token exchange. Concurrent callers share one exchange:
    /// whoever waited on the lock while another caller refreshed returns
    /// without exchanging again.
    pub async fn reauthenticate(&self) -> Result<()> {
        let seen = self.generation.load(Ordering::SeqCst);
        let _guard = self.refresh.lock().await;
        if self.generation.load(Ordering::SeqCst) != seen {
            tracing::debug!("token refreshed by a concurrent caller");
            return Ok(());
        }
        self.exchange_token().await
    }

    async fn exchange_token(&self) -> Result<()> {
        let granted = auth::request_token(self).await?;

        *self.token.write().await = Some(granted.token);
        if let Some(org_id) = granted.org_id {
            *self.org_id.write().await = org_id;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);

        tracing::info!(mode = %self.credential.mode(), "authenticated");
        Ok(())
    }

    /// Org id known before the exchange. Only credential modes that carry one.
    pub(crate) async fn seed_org_id(&self, org_id: &str) {
        *self.org_id.write().await = org_id.to_string();
    }

    /// Executes one authenticated call.
    pub async fn send<B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<ResponseBody>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, url, body, true).await
    }

    /// Executes one call without the auth header. Used for the token exchange.
    pub(crate) async fn send_unauthenticated<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<ResponseBody>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, url, body, false).await
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send::<()>(Method::GET, url, None).await?.json()
    }

    async fn execute<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<ResponseBody>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ClientError::Serialization)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        if authenticated {
            let token = self.token.read().await;
            if let Some(token) = token.as_ref() {
                let mut value = HeaderValue::from_str(token.expose_secret()).map_err(|_| {
                    ClientError::TokenParse("token is not a valid header value".to_string())
                })?;
                value.set_sensitive(true);
                headers.insert(HeaderName::from_static(AUTH_HEADER), value);
            }
        }

        tracing::debug!(method = %method, url = %url, "sending request");

        let request = HttpRequest {
            method: method.clone(),
            url: url.to_string(),
            headers,
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(method = %method, url = %url, error = %e, "transport failure");
                return Err(e.into());
            }
        };

        if response.status != StatusCode::OK && response.status != StatusCode::ACCEPTED {
            let err = classify_failure(response.status, &response.body);
            tracing::warn!(
                method = %method,
                url = %url,
                status = response.status.as_u16(),
                body = %String::from_utf8_lossy(&response.body),
                "request rejected"
            );
            return Err(err);
        }

        Ok(ResponseBody {
            method,
            url: url.to_string(),
            status: response.status,
            bytes: response.body,
        })
    }
}

/// `{"errorCode": ..., "errorMsg": ...}`. Some services send numeric codes.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "errorCode", default)]
    error_code: Option<serde_json::Value>,
    #[serde(rename = "errorMsg", default)]
    error_message: Option<String>,
}

fn classify_failure(status: StatusCode, body: &[u8]) -> ClientError {
    let cause = HttpError {
        status,
        body: String::from_utf8_lossy(body).into_owned(),
    };

    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error_code.is_some() || envelope.error_message.is_some() => {
            let error_code = match envelope.error_code {
                Some(serde_json::Value::String(code)) => code,
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            ClientError::Api(ApiError {
                status,
                error_code,
                error_message: envelope.error_message.unwrap_or_default(),
                cause,
            })
        }
        _ => ClientError::Http(cause),
    }
}

/// Body of a successful response, decoded on demand.
#[derive(Debug, Clone)]
pub struct ResponseBody {
    method: Method,
    url: String,
    status: StatusCode,
    bytes: Vec<u8>,
}

impl ResponseBody {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(u8::is_ascii_whitespace)
    }

    /// Decodes the body. An empty body is [`ClientError::EmptyBody`].
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        if self.is_empty() {
            return Err(ClientError::EmptyBody {
                method: self.method,
                url: self.url,
            });
        }
        serde_json::from_slice(&self.bytes).map_err(|source| ClientError::Deserialization {
            url: self.url,
            body: String::from_utf8_lossy(&self.bytes).into_owned(),
            source,
        })
    }

    /// Decodes the body when there is one.
    pub fn json_opt<T: DeserializeOwned>(self) -> Result<Option<T>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.json().map(Some)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
