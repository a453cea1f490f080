use serde::Deserialize;

/// Roles grouped per service type, as returned under `mdsServiceRoleDTOes`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRoles {
    pub service_type: String,
    pub roles: Vec<ServiceRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRole {
    pub role_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub permissions: Vec<RolePermission>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePermission {
    pub permission_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkPort {
    pub id: String,
    pub name: String,
    pub port: i64,
    pub description: String,
}
