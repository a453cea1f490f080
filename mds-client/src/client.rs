use std::sync::Arc;

use crate::auth::Credential;
use crate::config::ClientConfig;
use crate::core::{ReqwestTransport, Session, Transport};
use crate::error::Result;
use crate::services::{
    ControllerClient, CustomerMetadataClient, InfraConnectorClient, ServiceMetadataClient,
    UpgradeServiceClient,
};

/// Authenticated entry point. All endpoint clients share one [`Session`].
#[derive(Clone)]
pub struct MdsClient {
    session: Arc<Session>,
    pub controller: ControllerClient,
    pub infra_connector: InfraConnectorClient,
    pub customer_metadata: CustomerMetadataClient,
    pub service_metadata: ServiceMetadataClient,
    pub upgrade_service: UpgradeServiceClient,
}

impl MdsClient {
    /// Builds an HTTP transport from `config` and authenticates.
    pub async fn connect(config: &ClientConfig, credential: Credential) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(config)?);
        Self::with_transport(config, credential, transport).await
    }

    /// Authenticates over a caller-supplied transport.
    ///
    /// Fails on the first problem: a missing credential field, a rejected
    /// exchange or an unreadable token. There is no retry.
    pub async fn with_transport(
        config: &ClientConfig,
        credential: Credential,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let host_url = config.base_url()?;
        let session = Arc::new(Session::new(host_url, credential, transport));
        session.authenticate().await?;

        tracing::info!(
            host = %session.host_url(),
            org_id = %session.org_id().await,
            "mds client ready"
        );

        Ok(Self::from_session(session))
    }

    /// Wraps an existing session without authenticating it.
    pub fn from_session(session: Arc<Session>) -> Self {
        Self {
            controller: ControllerClient::new(session.clone()),
            infra_connector: InfraConnectorClient::new(session.clone()),
            customer_metadata: CustomerMetadataClient::new(session.clone()),
            service_metadata: ServiceMetadataClient::new(session.clone()),
            upgrade_service: UpgradeServiceClient::new(session.clone()),
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub async fn org_id(&self) -> String {
        self.session.org_id().await
    }

    pub async fn reauthenticate(&self) -> Result<()> {
        self.session.reauthenticate().await
    }
}
