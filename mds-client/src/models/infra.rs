use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudAccount {
    pub id: String,
    #[serde(rename = "userEmail")]
    pub email: String,
    pub name: String,
    pub account_type: String,
    pub org_id: String,
    pub shared: bool,
    pub tags: Vec<String>,
    #[serde(rename = "dataplanesCount")]
    pub data_plane_count: i64,
    pub created: String,
    pub created_by: String,
    pub modified: String,
    pub modified_by: String,
    pub management_ip: String,
}

impl Entity for CloudAccount {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudAccountCreateRequest {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub name: String,
    pub credentials: CloudCredentials,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudAccountUpdateRequest {
    pub name: String,
    pub credentials: CloudCredentials,
}

/// Provider-specific credential fields. Only the populated ones are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudCredentials {
    // gcp
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_key_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_uri: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token_uri: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_provider_x509_cert_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_x509_cert_url: String,

    // aws
    #[serde(rename = "ACCESS_KEY_ID", skip_serializing_if = "String::is_empty")]
    pub access_key_id: String,
    #[serde(rename = "SECRET_ACCESS_KEY", skip_serializing_if = "String::is_empty")]
    pub secret_access_key: String,
    #[serde(rename = "targetAmazonAccountId", skip_serializing_if = "String::is_empty")]
    pub target_amazon_account_id: String,
    #[serde(
        rename = "powerUserRoleNameInTargetAccount",
        skip_serializing_if = "String::is_empty"
    )]
    pub power_user_role_name: String,

    // log insight
    #[serde(rename = "apiEndpoint", skip_serializing_if = "String::is_empty")]
    pub api_endpoint: String,
    #[serde(rename = "apiKey", skip_serializing_if = "String::is_empty")]
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub domain_name: String,
    pub provider: String,
    #[serde(rename = "expirationTime")]
    pub expiry_time: String,
}

impl Entity for Certificate {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateCreateRequest {
    pub name: String,
    pub domain_name: String,
    pub provider: String,
    pub certificate: String,
    #[serde(rename = "certificateCA")]
    pub certificate_ca: String,
    pub certificate_key: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateUpdateRequest {
    pub certificate: String,
    #[serde(rename = "certificateCA")]
    pub certificate_ca: String,
    pub certificate_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataPlane {
    pub id: String,
    pub provider: String,
    pub name: String,
    pub region: String,
    #[serde(rename = "version")]
    pub k8s_version: String,
    pub certificate: DataPlaneCertificate,
    pub data_plane_release_name: String,
    pub status: String,
    #[serde(rename = "nodePoolType")]
    pub node_pool_type: String,
}

impl Entity for DataPlane {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataPlaneCertificate {
    pub domain_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlaneCreateRequest {
    pub account_id: String,
    pub certificate_id: String,
    pub name: String,
    #[serde(rename = "nodePoolType")]
    pub node_pool_type: String,
    pub region: String,
}

/// A region a cloud provider offers, as listed by `cloud-providers`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudProviderRegions {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectStorage {
    pub id: String,
    pub name: String,
    pub bucket_name: String,
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    /// Returned masked by the API.
    pub secret_access_key: String,
    pub org_id: String,
    pub created_by: String,
    pub modified_by: String,
    pub expiration_time: String,
}

impl Entity for ObjectStorage {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStorageCreateRequest {
    pub name: String,
    pub bucket_name: String,
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStorageUpdateRequest {
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_credentials_use_api_key_names() {
        let body = serde_json::to_value(CloudAccountCreateRequest {
            provider_type: "aws".to_string(),
            name: "prod".to_string(),
            credentials: CloudCredentials {
                access_key_id: "AKIA".to_string(),
                secret_access_key: "s".to_string(),
                ..Default::default()
            },
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "type": "aws",
                "name": "prod",
                "credentials": {"ACCESS_KEY_ID": "AKIA", "SECRET_ACCESS_KEY": "s"}
            })
        );
    }

    #[test]
    fn test_data_plane_reads_node_pool_type() {
        let plane: DataPlane = serde_json::from_str(
            r#"{"id":"dp-1","name":"east","status":"READY","nodePoolType":"large","version":"1.27"}"#,
        )
        .unwrap();
        assert_eq!(plane.node_pool_type, "large");
        assert_eq!(plane.k8s_version, "1.27");
    }
}
