use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cluster {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub service_type: String,
    pub provider: String,
    pub instance_size: String,
    pub region: String,
    pub tags: Vec<String>,
    pub version: String,
    pub status: String,
    pub data_plane_id: String,
    pub metadata: Option<ClusterMetadata>,
    pub created: String,
    pub last_updated: String,
    pub is_authorized: bool,
    pub maintenance_start_time: Option<i64>,
    pub maintenance_end_time: Option<i64>,
    #[serde(rename = "isUpgradeInProgress")]
    pub upgrade_in_progress: bool,
    pub pause_updates: bool,
}

impl Entity for Cluster {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterMetadata {
    pub cluster_name: String,
    pub manager_uri: String,
    pub connection_uri: String,
    /// The API spells this field `metricsEnpoints`.
    #[serde(rename = "metricsEnpoints")]
    pub metrics_endpoints: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCreateRequest {
    pub name: String,
    pub service_type: String,
    pub provider: String,
    pub instance_size: String,
    pub region: String,
    pub dedicated: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub shared: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub network_policy_ids: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_plane_id: String,
    pub version: String,
    pub storage_policy_name: String,
    pub cluster_metadata: PostgresClusterMetadata,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PostgresClusterMetadata {
    pub username: String,
    pub password: String,
    pub database: String,
    pub restore_from: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterNetworkPoliciesUpdateRequest {
    #[serde(rename = "networkPolicyIds")]
    pub network_policy_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUpgradeRequest {
    pub id: String,
    pub request_type: String,
    pub target_version: String,
    pub metadata: ClusterUpgradeMetadata,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUpgradeMetadata {
    pub omit_backup: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterUpgradeResponse {
    pub success: bool,
}

/// Sizes offered for one service type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceTypeList {
    pub instance_types: Vec<InstanceType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceType {
    pub id: String,
    pub service_type: String,
    pub instance_size: String,
    #[serde(rename = "instanceSizeDescription")]
    pub size_description: String,
    pub cpu: String,
    pub memory: String,
    pub storage: String,
    pub metadata: InstanceTypeMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceTypeMetadata {
    pub max_connections: i64,
    pub nodes: i64,
}
