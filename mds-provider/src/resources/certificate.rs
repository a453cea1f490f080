use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{Certificate, CertificateCreateRequest, CertificateUpdateRequest};

use super::{ManagedResource, diagnose};
use crate::diagnostics::Diagnostic;

#[derive(Clone)]
pub struct CertificateResource {
    client: MdsClient,
}

impl CertificateResource {
    pub fn new(client: MdsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for CertificateResource {
    type Desired = CertificateCreateRequest;
    type State = Certificate;

    const KIND: &'static str = "certificate";

    async fn create(&self, desired: &CertificateCreateRequest) -> Result<Certificate, Diagnostic> {
        self.client
            .infra_connector
            .create_certificate(desired)
            .await
            .map_err(diagnose("Creating certificate"))
    }

    async fn read(&self, id: &str) -> Result<Certificate, Diagnostic> {
        self.client
            .infra_connector
            .certificate(id)
            .await
            .map_err(diagnose("Reading certificate"))
    }

    /// Rotates the certificate material.
    async fn update(
        &self,
        id: &str,
        desired: &CertificateCreateRequest,
    ) -> Result<Certificate, Diagnostic> {
        let request = CertificateUpdateRequest {
            certificate: desired.certificate.clone(),
            certificate_ca: desired.certificate_ca.clone(),
            certificate_key: desired.certificate_key.clone(),
        };
        self.client
            .infra_connector
            .update_certificate(id, &request)
            .await
            .map_err(diagnose("Updating certificate"))
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.client
            .infra_connector
            .delete_certificate(id)
            .await
            .map_err(diagnose("Deleting certificate"))
    }
}
