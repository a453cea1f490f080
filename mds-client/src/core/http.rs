use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result, TransportError};

/// One outgoing call, fully built: headers injected and body serialized.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A response read to the end. The underlying connection is already released.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Executes exactly one request/response cycle.
///
/// Implementations report only failures below HTTP. Any status, success or
/// not, comes back as an [`HttpResponse`] for the session to classify.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| {
                ClientError::InvalidConfiguration(format!("failed to build http client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, e))?;

        let status = response.status();
        // Reading consumes the response; the connection goes back to the pool
        // on success and is dropped on error.
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, e))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
