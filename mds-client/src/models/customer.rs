use serde::{Deserialize, Serialize};

use super::Entity;

/// Value of `accountType` for people.
pub const USER_ACCOUNT: &str = "USER_ACCOUNT";
/// Value of `accountType` for machine identities.
pub const SERVICE_ACCOUNT: &str = "SERVICE_ACCOUNT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub status: String,
    pub org_roles: Vec<RoleRef>,
    pub service_roles: Vec<RoleRef>,
    pub tags: Vec<String>,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleRef {
    pub role_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    pub account_type: String,
    /// Emails to invite.
    pub usernames: Vec<String>,
    pub policy_ids: Vec<String>,
    pub service_roles: Vec<RoleRequest>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub tags: Vec<String>,
    pub policy_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_roles: Option<Vec<RoleRequest>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceAccount {
    pub id: String,
    pub name: String,
    pub status: String,
    pub tags: Vec<String>,
}

impl Entity for ServiceAccount {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountCreateRequest {
    pub account_type: String,
    pub usernames: Vec<String>,
    pub policy_ids: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountUpdateRequest {
    pub tags: Vec<String>,
    pub policy_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub resource_ids: Vec<String>,
    pub permissions_spec: Vec<PermissionSpec>,
    pub network_specs: Vec<NetworkSpec>,
}

impl Entity for Policy {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionSpec {
    pub resource: String,
    pub permissions: Vec<String>,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkSpec {
    pub cidr: String,
    pub network_port_ids: Vec<String>,
}

/// Used for both create (`POST`) and update (`PUT`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    pub name: String,
    pub description: String,
    pub service_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions_spec: Vec<PermissionSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub network_specs: Vec<NetworkSpec>,
}
