#![allow(dead_code)]

use mds_client::core::mock::unsigned_token;
use mds_client::core::{MockReply, MockTransport};
use mds_client::http::{Method, StatusCode};
use mds_client::models::Cluster;
use mds_client::{ApiError, ClientConfig, ClientError, Credential, HttpError, MdsClient};
use mds_provider::{PollSettings, Provider};
use std::sync::Arc;

pub const TOKEN_PATH: &str = "/api/authservice/token";

pub fn test_token() -> String {
    unsigned_token(&serde_json::json!({
        "sub": "test-user",
        "context_name": "test-org",
        "exp": 9999999999i64,
    }))
}

/// A provider whose client talks to `mock`, with the default poll settings.
pub async fn provider_over(mock: &Arc<MockTransport>) -> Provider {
    provider_with(mock, PollSettings::default()).await
}

pub async fn provider_with(mock: &Arc<MockTransport>, poll: PollSettings) -> Provider {
    mock.on(
        Method::POST,
        TOKEN_PATH,
        MockReply::text(StatusCode::OK, &test_token()),
    );
    let client = MdsClient::with_transport(
        &ClientConfig::for_host("https://mds.test"),
        Credential::api_token("test-api-key"),
        mock.clone(),
    )
    .await
    .expect("Failed to build test client");

    Provider::new(client, poll)
}

pub fn paged(key: &str, items: serde_json::Value, total: u64) -> serde_json::Value {
    serde_json::json!({
        "_embedded": { key: items },
        "page": {
            "number": 0,
            "size": 100,
            "totalElements": total,
            "totalPages": if total == 0 { 0 } else { 1 },
        }
    })
}

pub fn cluster(id: &str, status: &str) -> Cluster {
    Cluster {
        id: id.to_string(),
        name: "orders-db".to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

pub fn api_error(status: StatusCode, code: &str) -> ClientError {
    let body = serde_json::json!({ "errorCode": code, "errorMsg": "test" }).to_string();
    ClientError::Api(ApiError {
        status,
        error_code: code.to_string(),
        error_message: "test".to_string(),
        cause: HttpError { status, body },
    })
}
