use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{CloudAccount, CloudAccountCreateRequest, CloudAccountUpdateRequest};

use super::{ManagedResource, diagnose};
use crate::diagnostics::Diagnostic;

#[derive(Clone)]
pub struct CloudAccountResource {
    client: MdsClient,
}

impl CloudAccountResource {
    pub fn new(client: MdsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for CloudAccountResource {
    type Desired = CloudAccountCreateRequest;
    type State = CloudAccount;

    const KIND: &'static str = "cloud account";

    async fn create(&self, desired: &CloudAccountCreateRequest) -> Result<CloudAccount, Diagnostic> {
        self.client
            .infra_connector
            .create_cloud_account(desired)
            .await
            .map_err(diagnose("Creating cloud account"))
    }

    async fn read(&self, id: &str) -> Result<CloudAccount, Diagnostic> {
        self.client
            .infra_connector
            .cloud_account(id)
            .await
            .map_err(diagnose("Reading cloud account"))
    }

    /// The provider type is fixed at creation; name and credentials can change.
    async fn update(
        &self,
        id: &str,
        desired: &CloudAccountCreateRequest,
    ) -> Result<CloudAccount, Diagnostic> {
        let request = CloudAccountUpdateRequest {
            name: desired.name.clone(),
            credentials: desired.credentials.clone(),
        };
        self.client
            .infra_connector
            .update_cloud_account(id, &request)
            .await
            .map_err(diagnose("Updating cloud account"))?;

        self.read(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.client
            .infra_connector
            .delete_cloud_account(id)
            .await
            .map_err(diagnose("Deleting cloud account"))
    }
}
