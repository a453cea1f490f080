use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{Policy, PolicyRequest};

use super::{ManagedResource, diagnose};
use crate::diagnostics::Diagnostic;

/// Access and network policies. Create and update apply synchronously.
#[derive(Clone)]
pub struct PolicyResource {
    client: MdsClient,
}

impl PolicyResource {
    pub fn new(client: MdsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for PolicyResource {
    type Desired = PolicyRequest;
    type State = Policy;

    const KIND: &'static str = "policy";

    async fn create(&self, desired: &PolicyRequest) -> Result<Policy, Diagnostic> {
        self.client
            .customer_metadata
            .create_policy(desired)
            .await
            .map_err(diagnose("Creating policy"))
    }

    async fn read(&self, id: &str) -> Result<Policy, Diagnostic> {
        self.client
            .customer_metadata
            .policy(id)
            .await
            .map_err(diagnose("Reading policy"))
    }

    async fn update(&self, id: &str, desired: &PolicyRequest) -> Result<Policy, Diagnostic> {
        self.client
            .customer_metadata
            .update_policy(id, desired)
            .await
            .map_err(diagnose("Updating policy"))?;

        self.read(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.client
            .customer_metadata
            .delete_policy(id)
            .await
            .map_err(diagnose("Deleting policy"))
    }
}
