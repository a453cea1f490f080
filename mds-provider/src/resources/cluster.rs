use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{Cluster, ClusterCreateRequest};
use mds_client::services::ClustersQuery;

use super::{ManagedResource, Timeouts, diagnose};
use crate::config::PollSettings;
use crate::diagnostics::Diagnostic;
use crate::error::ProviderError;
use crate::reconcile::{await_created, await_deleted};

#[derive(Debug, Clone, Default)]
pub struct ClusterSpec {
    pub name: String,
    pub service_type: String,
    pub provider: String,
    pub instance_size: String,
    pub region: String,
    pub dedicated: bool,
    pub tags: Vec<String>,
    /// Applied at create only. Later changes go through
    /// [`ClusterNetworkPoliciesResource`](super::ClusterNetworkPoliciesResource).
    pub network_policy_ids: Vec<String>,
}

impl ClusterSpec {
    fn create_request(&self) -> ClusterCreateRequest {
        ClusterCreateRequest {
            name: self.name.clone(),
            service_type: self.service_type.clone(),
            provider: self.provider.clone(),
            instance_size: self.instance_size.clone(),
            region: self.region.clone(),
            dedicated: self.dedicated,
            tags: self.tags.clone(),
            network_policy_ids: self.network_policy_ids.clone(),
            ..Default::default()
        }
    }
}

/// Managed service clusters. Create waits for `READY`; delete waits until the
/// cluster is no longer found.
#[derive(Clone)]
pub struct ClusterResource {
    client: MdsClient,
    poll: PollSettings,
    timeouts: Timeouts,
}

impl ClusterResource {
    pub fn new(client: MdsClient, poll: PollSettings) -> Self {
        Self {
            client,
            poll,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(self, timeouts: Timeouts) -> Self {
        Self { timeouts, ..self }
    }
}

#[async_trait]
impl ManagedResource for ClusterResource {
    type Desired = ClusterSpec;
    type State = Cluster;

    const KIND: &'static str = "cluster";

    async fn create(&self, desired: &ClusterSpec) -> Result<Cluster, Diagnostic> {
        let target = self
            .timeouts
            .create_target(Self::KIND, &desired.name, self.poll.cluster_create());

        let controller = &self.client.controller;
        controller
            .create_cluster(&desired.create_request())
            .await
            .map_err(diagnose("Submitting request to create cluster"))?;

        let query = ClustersQuery {
            service_type: desired.service_type.clone(),
            name: desired.name.clone(),
            full_name_match: true,
        };
        await_created(
            &target,
            || async move {
                controller
                    .all_clusters(&query)
                    .await
                    .map(|clusters| {
                        clusters
                            .into_iter()
                            .filter(|cluster| cluster.name == desired.name)
                            .collect::<Vec<_>>()
                    })
                    .map_err(ProviderError::from)
            },
            |id| async move { controller.cluster(&id).await },
        )
        .await
        .map_err(diagnose("Waiting for cluster to become ready"))
    }

    async fn read(&self, id: &str) -> Result<Cluster, Diagnostic> {
        self.client
            .controller
            .cluster(id)
            .await
            .map_err(diagnose("Reading MDS cluster"))
    }

    /// Only tags can change in place.
    async fn update(&self, id: &str, desired: &ClusterSpec) -> Result<Cluster, Diagnostic> {
        self.client
            .controller
            .update_cluster_tags(id, &desired.tags)
            .await
            .map_err(diagnose("Updating MDS cluster"))
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        let target = self
            .timeouts
            .delete_target(Self::KIND, id, self.poll.cluster_delete());

        let controller = &self.client.controller;
        controller
            .delete_cluster(id)
            .await
            .map_err(diagnose("Deleting MDS cluster"))?;

        await_deleted(&target, |id| async move { controller.cluster(&id).await })
            .await
            .map_err(diagnose("Waiting for cluster deletion"))?;
        Ok(())
    }
}
