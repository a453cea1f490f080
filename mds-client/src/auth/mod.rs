//! Token exchange against the auth service.
//!
//! Validate, exchange, parse, store. Any failure is fatal to client
//! construction and nothing is retried.

pub mod credential;

use http::Method;
use secrecy::Secret;

pub use credential::{AuthMode, Credential};

use crate::core::Session;
use crate::error::{ClientError, Result};
use crate::utils::jwt::decode_claims;

pub const ENDPOINT: &str = "authservice";
const TOKEN: &str = "token";

/// Outcome of a successful exchange.
pub(crate) struct GrantedToken {
    pub token: Secret<String>,
    /// Org id to store on the session, when the exchange determined one.
    pub org_id: Option<String>,
}

/// Exchanges the session's credential for a bearer token.
///
/// Validation runs first and makes no network call. The org id of the
/// client- and user-credentials modes is written to the session before the
/// request goes out; the api-token mode learns it from the `context_name`
/// claim of the returned token.
pub(crate) async fn request_token(session: &Session) -> Result<GrantedToken> {
    let credential = session.credential();
    credential.validate()?;

    if let Some(org_id) = credential.org_id() {
        session.seed_org_id(org_id).await;
    }

    let url = format!("{}/{}", session.endpoint(ENDPOINT), TOKEN);
    let body = session
        .send_unauthenticated(Method::POST, &url, Some(&credential.token_request()))
        .await
        .map_err(|e| ClientError::TokenExchangeFailed(Box::new(e)))?;

    let token = body.text().trim().to_string();
    if token.is_empty() {
        return Err(ClientError::TokenExchangeFailed(Box::new(
            ClientError::EmptyBody {
                method: Method::POST,
                url,
            },
        )));
    }

    let claims = decode_claims(&token)?;
    let org_id = match credential.mode() {
        AuthMode::ApiToken => Some(claims.context_name.filter(|c| !c.is_empty()).ok_or_else(
            || ClientError::TokenParse("token has no context_name claim".to_string()),
        )?),
        AuthMode::ClientCredentials | AuthMode::UserCredentials => None,
    };

    Ok(GrantedToken {
        token: Secret::new(token),
        org_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::{MockReply, MockTransport, unsigned_token};
    use http::StatusCode;
    use std::sync::Arc;

    const TOKEN_PATH: &str = "/api/authservice/token";

    fn session_with(credential: Credential, mock: &Arc<MockTransport>) -> Session {
        Session::new("http://mds.test".to_string(), credential, mock.clone())
    }

    #[tokio::test]
    async fn test_missing_fields_make_no_network_call() {
        let credentials = [
            Credential::api_token(""),
            Credential::client_credentials("", "secret", "org"),
            Credential::client_credentials("id", "", "org"),
            Credential::client_credentials("id", "secret", ""),
            Credential::user_credentials("", "pw", "org"),
            Credential::user_credentials("me", "", "org"),
            Credential::user_credentials("me", "pw", ""),
        ];

        for credential in credentials {
            let mock = Arc::new(MockTransport::new());
            let session = session_with(credential, &mock);

            let err = session.authenticate().await.unwrap_err();

            assert!(matches!(err, ClientError::MissingCredentialField { .. }));
            assert_eq!(mock.call_count(), 0);
            assert!(!session.is_authenticated().await);
        }
    }

    #[tokio::test]
    async fn test_api_token_org_comes_from_claims() {
        let mock = Arc::new(MockTransport::new());
        let token = unsigned_token(&serde_json::json!({"context_name": "org-from-token"}));
        mock.on(Method::POST, TOKEN_PATH, MockReply::text(StatusCode::OK, &token));
        let session = session_with(Credential::api_token("key"), &mock);

        session.authenticate().await.unwrap();

        assert!(session.is_authenticated().await);
        assert_eq!(session.org_id().await, "org-from-token");
        let body: serde_json::Value =
            serde_json::from_slice(mock.last_request().unwrap().body.as_deref().unwrap()).unwrap();
        assert_eq!(body["apiKey"], "key");
        assert_eq!(body["oAuthAppTypes"], "api_token");
    }

    #[tokio::test]
    async fn test_client_credentials_keep_their_org() {
        let mock = Arc::new(MockTransport::new());
        let token = unsigned_token(&serde_json::json!({"context_name": "other-org"}));
        mock.on(Method::POST, TOKEN_PATH, MockReply::text(StatusCode::OK, &token));
        let session = session_with(Credential::client_credentials("id", "secret", "org-1"), &mock);

        session.authenticate().await.unwrap();

        assert_eq!(session.org_id().await, "org-1");
    }

    #[tokio::test]
    async fn test_api_token_without_context_claim_is_parse_error() {
        let mock = Arc::new(MockTransport::new());
        let token = unsigned_token(&serde_json::json!({"sub": "someone"}));
        mock.on(Method::POST, TOKEN_PATH, MockReply::text(StatusCode::OK, &token));
        let session = session_with(Credential::api_token("key"), &mock);

        let err = session.authenticate().await.unwrap_err();
        assert!(matches!(err, ClientError::TokenParse(_)));
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_unparseable_token_is_parse_error() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::POST, TOKEN_PATH, MockReply::text(StatusCode::OK, "opaque"));
        let session = session_with(Credential::user_credentials("me", "pw", "org"), &mock);

        let err = session.authenticate().await.unwrap_err();
        assert!(matches!(err, ClientError::TokenParse(_)));
    }

    #[tokio::test]
    async fn test_rejected_exchange_wraps_api_error() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            Method::POST,
            TOKEN_PATH,
            MockReply::api_error(StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", "bad key"),
        );
        let session = session_with(Credential::api_token("key"), &mock);

        let err = session.authenticate().await.unwrap_err();

        assert!(matches!(err, ClientError::TokenExchangeFailed(_)));
        assert_eq!(err.as_api_error().unwrap().error_code, "INVALID_CREDENTIALS");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_token_call_carries_no_auth_header() {
        let mock = Arc::new(MockTransport::new());
        let token = unsigned_token(&serde_json::json!({"context_name": "org"}));
        mock.on(Method::POST, TOKEN_PATH, MockReply::text(StatusCode::OK, &token));
        let session = session_with(Credential::api_token("key"), &mock);

        session.authenticate().await.unwrap();
        session.reauthenticate().await.unwrap();

        for request in mock.requests() {
            assert!(request.headers.get(crate::core::AUTH_HEADER).is_none());
        }
        assert_eq!(mock.call_count(), 2);
    }
}
