#![allow(dead_code)]

use mds_client::core::mock::unsigned_token;
use mds_client::{ClientConfig, Credential, MdsClient};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_ORG_ID: &str = "test-org";
pub const TOKEN_PATH: &str = "/api/authservice/token";

pub fn test_token() -> String {
    unsigned_token(&serde_json::json!({
        "sub": "test-user",
        "context_name": TEST_ORG_ID,
        "exp": 9999999999i64,
    }))
}

/// A management API stand-in that already answers the token exchange.
pub struct TestApi {
    pub server: MockServer,
    pub token: String,
}

impl TestApi {
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;
        let token = test_token();

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(token.clone()))
            .mount(&server)
            .await;

        Self { server, token }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(5),
            ..ClientConfig::for_host(&self.server.uri())
        }
    }

    pub async fn client(&self) -> MdsClient {
        MdsClient::connect(&self.config(), Credential::api_token("test-api-key"))
            .await
            .expect("Failed to connect test client")
    }
}

pub fn paged(key: &str, items: serde_json::Value, number: u32, size: u32, total: u64) -> serde_json::Value {
    let total_pages = total.div_ceil(size as u64);
    serde_json::json!({
        "_embedded": { key: items },
        "page": {
            "number": number,
            "size": size,
            "totalElements": total,
            "totalPages": total_pages,
        }
    })
}
