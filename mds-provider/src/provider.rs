use mds_client::MdsClient;

use crate::config::{PollSettings, ProviderOverrides, ProviderSettings};
use crate::diagnostics::Diagnostic;
use crate::resources::{
    CertificateResource, CloudAccountResource, ClusterNetworkPoliciesResource, ClusterResource,
    DataPlaneResource, ObjectStorageResource, PolicyResource, ServiceAccountResource,
    UserResource, diagnose,
};

/// A configured provider: one authenticated client shared by every resource.
#[derive(Clone)]
pub struct Provider {
    client: MdsClient,
    poll: PollSettings,
}

impl Provider {
    /// Resolves settings from the environment and `overrides`, validates them
    /// and authenticates.
    pub async fn configure(overrides: &ProviderOverrides) -> Result<Self, Diagnostic> {
        let settings = ProviderSettings::load(overrides)
            .map_err(diagnose("Loading MDS provider configuration"))?;
        Self::from_settings(&settings).await
    }

    pub async fn from_settings(settings: &ProviderSettings) -> Result<Self, Diagnostic> {
        let credential = settings
            .credential()
            .map_err(diagnose("Invalid MDS provider configuration"))?;

        let client = MdsClient::connect(&settings.client_config(), credential)
            .await
            .map_err(diagnose("Unable to create MDS API client"))?;

        tracing::info!(host = %settings.host, "mds provider configured");
        Ok(Self::new(client, settings.poll.clone()))
    }

    pub fn new(client: MdsClient, poll: PollSettings) -> Self {
        Self { client, poll }
    }

    pub fn client(&self) -> &MdsClient {
        &self.client
    }

    pub fn clusters(&self) -> ClusterResource {
        ClusterResource::new(self.client.clone(), self.poll.clone())
    }

    pub fn cluster_network_policies(&self) -> ClusterNetworkPoliciesResource {
        ClusterNetworkPoliciesResource::new(self.client.clone())
    }

    pub fn data_planes(&self) -> DataPlaneResource {
        DataPlaneResource::new(self.client.clone(), self.poll.clone())
    }

    pub fn users(&self) -> UserResource {
        UserResource::new(self.client.clone(), self.poll.clone())
    }

    pub fn service_accounts(&self) -> ServiceAccountResource {
        ServiceAccountResource::new(self.client.clone(), self.poll.clone())
    }

    pub fn policies(&self) -> PolicyResource {
        PolicyResource::new(self.client.clone())
    }

    pub fn cloud_accounts(&self) -> CloudAccountResource {
        CloudAccountResource::new(self.client.clone())
    }

    pub fn certificates(&self) -> CertificateResource {
        CertificateResource::new(self.client.clone())
    }

    pub fn object_storages(&self) -> ObjectStorageResource {
        ObjectStorageResource::new(self.client.clone())
    }
}
