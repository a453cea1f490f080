use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{DataPlane, DataPlaneCreateRequest};
use mds_client::services::DataPlanesQuery;

use super::{ManagedResource, Timeouts, diagnose};
use crate::config::PollSettings;
use crate::diagnostics::Diagnostic;
use crate::error::ProviderError;
use crate::reconcile::{await_created, await_deleted};

#[derive(Debug, Clone, Default)]
pub struct DataPlaneSpec {
    pub name: String,
    pub account_id: String,
    pub certificate_id: String,
    pub region: String,
    pub node_pool_type: String,
}

/// Customer-hosted data planes. Create waits for the configured ready status
/// (`READY` unless set otherwise); delete waits until the plane is gone.
#[derive(Clone)]
pub struct DataPlaneResource {
    client: MdsClient,
    poll: PollSettings,
    timeouts: Timeouts,
}

impl DataPlaneResource {
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
impl ManagedResource for DataPlaneResource {
    type Desired = DataPlaneSpec;
    type State = DataPlane;

    const KIND: &'static str = "data plane";

    async fn create(&self, desired: &DataPlaneSpec) -> Result<DataPlane, Diagnostic> {
        let target = self
            .timeouts
            .create_target(Self::KIND, &desired.name, self.poll.data_plane_create())
            .ready_when(self.poll.data_plane_ready_status.clone());
        let infra = &self.client.infra_connector;

        let request = DataPlaneCreateRequest {
            name: desired.name.clone(),
            account_id: desired.account_id.clone(),
            certificate_id: desired.certificate_id.clone(),
            region: desired.region.clone(),
            node_pool_type: desired.node_pool_type.clone(),
        };
        infra
            .create_data_plane(&request)
            .await
            .map_err(diagnose("Submitting request to create data plane"))?;

        let query = DataPlanesQuery {
            name: desired.name.clone(),
        };
        await_created(
            &target,
            || async move {
                infra
                    .all_data_planes(&query)
                    .await
                    .map(|planes| {
                        planes
                            .into_iter()
                            .filter(|plane| plane.name == desired.name)
                            .collect::<Vec<_>>()
                    })
                    .map_err(ProviderError::from)
            },
            |id| async move { infra.data_plane(&id).await },
        )
        .await
        .map_err(diagnose("Waiting for data plane to become ready"))
    }

    async fn read(&self, id: &str) -> Result<DataPlane, Diagnostic> {
        self.client
            .infra_connector
            .data_plane(id)
            .await
            .map_err(diagnose("Reading data plane"))
    }

    /// Data planes cannot be changed in place; returns the current state.
    async fn update(&self, id: &str, _desired: &DataPlaneSpec) -> Result<DataPlane, Diagnostic> {
        tracing::warn!(id = %id, "data planes do not support in-place updates");
        self.read(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        let target = self
            .timeouts
            .delete_target(Self::KIND, id, self.poll.data_plane_delete());
        let infra = &self.client.infra_connector;

        infra
            .delete_data_plane(id)
            .await
            .map_err(diagnose("Deleting data plane"))?;

        await_deleted(&target, |id| async move { infra.data_plane(&id).await })
            .await
            .map_err(diagnose("Waiting for data plane deletion"))?;
        Ok(())
    }
}
