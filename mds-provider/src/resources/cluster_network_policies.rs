use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::ClusterNetworkPoliciesUpdateRequest;
use mds_client::services::PoliciesQuery;

use super::{ManagedResource, diagnose};
use crate::diagnostics::Diagnostic;

/// Policy service type the API uses for network policies.
const NETWORK: &str = "NETWORK";

/// The set of network policies attached to one cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterNetworkPolicies {
    pub cluster_id: String,
    pub policy_ids: Vec<String>,
}

/// Attaches network policies to an existing cluster.
///
/// The id is the cluster id. Every write replaces the whole set; delete
/// detaches all of them and leaves the cluster in place.
#[derive(Clone)]
pub struct ClusterNetworkPoliciesResource {
    client: MdsClient,
}

impl ClusterNetworkPoliciesResource {
    pub fn new(client: MdsClient) -> Self {
        Self { client }
    }

    async fn replace(
        &self,
        cluster_id: &str,
        policy_ids: &[String],
        summary: &'static str,
    ) -> Result<ClusterNetworkPolicies, Diagnostic> {
        let request = ClusterNetworkPoliciesUpdateRequest {
            network_policy_ids: policy_ids.to_vec(),
        };
        self.client
            .controller
            .update_cluster_network_policies(cluster_id, &request)
            .await
            .map_err(diagnose(summary))?;

        tracing::info!(cluster_id = %cluster_id, policies = policy_ids.len(), "network policies applied");
        Ok(ClusterNetworkPolicies {
            cluster_id: cluster_id.to_string(),
            policy_ids: policy_ids.to_vec(),
        })
    }
}

#[async_trait]
impl ManagedResource for ClusterNetworkPoliciesResource {
    type Desired = ClusterNetworkPolicies;
    type State = ClusterNetworkPolicies;

    const KIND: &'static str = "cluster network policies";

    async fn create(&self, desired: &ClusterNetworkPolicies) -> Result<ClusterNetworkPolicies, Diagnostic> {
        self.replace(
            &desired.cluster_id,
            &desired.policy_ids,
            "Creating cluster network policies association",
        )
        .await
    }

    async fn read(&self, id: &str) -> Result<ClusterNetworkPolicies, Diagnostic> {
        let query = PoliciesQuery {
            service_type: NETWORK.to_string(),
            resource_id: id.to_string(),
            ..Default::default()
        };
        let policies = self
            .client
            .customer_metadata
            .all_policies(&query)
            .await
            .map_err(diagnose("Reading cluster network policies"))?;

        Ok(ClusterNetworkPolicies {
            cluster_id: id.to_string(),
            policy_ids: policies.into_iter().map(|policy| policy.id).collect(),
        })
    }

    async fn update(
        &self,
        id: &str,
        desired: &ClusterNetworkPolicies,
    ) -> Result<ClusterNetworkPolicies, Diagnostic> {
        self.replace(id, &desired.policy_ids, "Updating cluster network policies association")
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.replace(id, &[], "Deleting cluster network policies association")
            .await?;
        Ok(())
    }
}
