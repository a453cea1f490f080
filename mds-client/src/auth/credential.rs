use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Authentication mode, serialized with the names the token endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    ApiToken,
    ClientCredentials,
    UserCredentials,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::ApiToken => "api_token",
            AuthMode::ClientCredentials => "client_credentials",
            AuthMode::UserCredentials => "user_credentials",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "api_token" => Ok(AuthMode::ApiToken),
            "client_credentials" => Ok(AuthMode::ClientCredentials),
            "user_credentials" => Ok(AuthMode::UserCredentials),
            other => Err(ClientError::invalid_argument(format!(
                "unknown authentication type '{}'",
                other
            ))),
        }
    }
}

/// The credential a session authenticates with. Exactly one mode is active.
#[derive(Clone, Debug)]
pub enum Credential {
    ApiToken {
        api_token: Secret<String>,
    },
    ClientCredentials {
        client_id: String,
        client_secret: Secret<String>,
        org_id: String,
    },
    UserCredentials {
        username: String,
        password: Secret<String>,
        org_id: String,
    },
}

impl Credential {
    pub fn api_token(api_token: impl Into<String>) -> Self {
        Credential::ApiToken {
            api_token: Secret::new(api_token.into()),
        }
    }

    pub fn client_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        org_id: impl Into<String>,
    ) -> Self {
        Credential::ClientCredentials {
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
            org_id: org_id.into(),
        }
    }

    pub fn user_credentials(
        username: impl Into<String>,
        password: impl Into<String>,
        org_id: impl Into<String>,
    ) -> Self {
        Credential::UserCredentials {
            username: username.into(),
            password: Secret::new(password.into()),
            org_id: org_id.into(),
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Credential::ApiToken { .. } => AuthMode::ApiToken,
            Credential::ClientCredentials { .. } => AuthMode::ClientCredentials,
            Credential::UserCredentials { .. } => AuthMode::UserCredentials,
        }
    }

    /// Organization id carried by the credential itself, if the mode has one.
    pub fn org_id(&self) -> Option<&str> {
        match self {
            Credential::ApiToken { .. } => None,
            Credential::ClientCredentials { org_id, .. }
            | Credential::UserCredentials { org_id, .. } => Some(org_id.as_str()),
        }
    }

    /// Checks every field the active mode needs, in the order the token
    /// endpoint documents them. Makes no network calls.
    pub fn validate(&self) -> Result<()> {
        let mode = self.mode();
        match self {
            Credential::ApiToken { api_token } => {
                require(mode, "api_token", api_token.expose_secret())
            }
            Credential::ClientCredentials {
                client_id,
                client_secret,
                org_id,
            } => {
                require(mode, "client_id", client_id)?;
                require(mode, "client_secret", client_secret.expose_secret())?;
                require(mode, "org_id", org_id)
            }
            Credential::UserCredentials {
                username,
                password,
                org_id,
            } => {
                require(mode, "username", username)?;
                require(mode, "password", password.expose_secret())?;
                require(mode, "org_id", org_id)
            }
        }
    }

    pub(crate) fn token_request(&self) -> TokenRequest<'_> {
        let mut request = TokenRequest {
            o_auth_app_types: self.mode().as_str(),
            ..Default::default()
        };
        match self {
            Credential::ApiToken { api_token } => {
                request.api_key = api_token.expose_secret().as_str();
            }
            Credential::ClientCredentials {
                client_id,
                client_secret,
                org_id,
            } => {
                request.client_id = client_id.as_str();
                request.client_secret = client_secret.expose_secret().as_str();
                request.org_id = org_id.as_str();
            }
            Credential::UserCredentials {
                username,
                password,
                org_id,
            } => {
                request.username = username.as_str();
                request.password = password.expose_secret().as_str();
                request.org_id = org_id.as_str();
            }
        }
        request
    }
}

fn require(mode: AuthMode, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::MissingCredentialField { mode, field });
    }
    Ok(())
}

/// Body of `POST /api/authservice/token`. Empty fields are left out.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenRequest<'a> {
    #[serde(skip_serializing_if = "is_blank")]
    pub api_key: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub client_id: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub client_secret: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub org_id: &'a str,
    #[serde(rename = "oAuthAppTypes")]
    pub o_auth_app_types: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub username: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    pub password: &'a str,
}

fn is_blank(value: &&str) -> bool {
    value.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_field(credential: &Credential) -> &'static str {
        match credential.validate() {
            Err(ClientError::MissingCredentialField { field, .. }) => field,
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_api_token_requires_token() {
        assert_eq!(missing_field(&Credential::api_token("")), "api_token");
        assert!(Credential::api_token("abc").validate().is_ok());
    }

    #[test]
    fn test_client_credentials_name_each_missing_field() {
        assert_eq!(
            missing_field(&Credential::client_credentials("", "secret", "org")),
            "client_id"
        );
        assert_eq!(
            missing_field(&Credential::client_credentials("id", "", "org")),
            "client_secret"
        );
        assert_eq!(
            missing_field(&Credential::client_credentials("id", "secret", " ")),
            "org_id"
        );
    }

    #[test]
    fn test_user_credentials_name_each_missing_field() {
        assert_eq!(
            missing_field(&Credential::user_credentials("", "pw", "org")),
            "username"
        );
        assert_eq!(
            missing_field(&Credential::user_credentials("me", "", "org")),
            "password"
        );
        assert_eq!(
            missing_field(&Credential::user_credentials("me", "pw", "")),
            "org_id"
        );
    }

    #[test]
    fn test_token_request_only_carries_populated_fields() {
        let credential = Credential::client_credentials("id-1", "s3cret", "org-9");
        let body = serde_json::to_value(credential.token_request()).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "clientId": "id-1",
                "clientSecret": "s3cret",
                "orgId": "org-9",
                "oAuthAppTypes": "client_credentials",
            })
        );
    }

    #[test]
    fn test_auth_mode_parses_wire_names() {
        assert_eq!(
            "CLIENT_CREDENTIALS".parse::<AuthMode>().unwrap(),
            AuthMode::ClientCredentials
        );
        assert!("oauth".parse::<AuthMode>().is_err());
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let credential = Credential::user_credentials("me", "hunter2", "org");
        assert!(!format!("{:?}", credential).contains("hunter2"));
    }
}
