use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{ObjectStorage, ObjectStorageCreateRequest, ObjectStorageUpdateRequest};

use super::{ManagedResource, diagnose};
use crate::diagnostics::Diagnostic;

/// Backup object storage. Only the access keys can be rotated.
#[derive(Clone)]
pub struct ObjectStorageResource {
    client: MdsClient,
}

impl ObjectStorageResource {
    pub fn new(client: MdsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for ObjectStorageResource {
    type Desired = ObjectStorageCreateRequest;
    type State = ObjectStorage;

    const KIND: &'static str = "object storage";

    async fn create(&self, desired: &ObjectStorageCreateRequest) -> Result<ObjectStorage, Diagnostic> {
        self.client
            .infra_connector
            .create_object_storage(desired)
            .await
            .map_err(diagnose("Creating object storage"))
    }

    async fn read(&self, id: &str) -> Result<ObjectStorage, Diagnostic> {
        self.client
            .infra_connector
            .object_storage(id)
            .await
            .map_err(diagnose("Reading object storage"))
    }

    async fn update(
        &self,
        id: &str,
        desired: &ObjectStorageCreateRequest,
    ) -> Result<ObjectStorage, Diagnostic> {
        let request = ObjectStorageUpdateRequest {
            access_key_id: desired.access_key_id.clone(),
            secret_access_key: desired.secret_access_key.clone(),
        };
        self.client
            .infra_connector
            .update_object_storage(id, &request)
            .await
            .map_err(diagnose("Updating object storage"))
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.client
            .infra_connector
            .delete_object_storage(id)
            .await
            .map_err(diagnose("Deleting object storage"))
    }
}
