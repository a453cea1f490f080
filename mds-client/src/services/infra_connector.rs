use http::Method;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ListResult, get_all, get_page, require_id};
use crate::core::{QueryParams, Session, ToQuery};
use crate::error::Result;
use crate::models::{
    Certificate, CertificateCreateRequest, CertificateUpdateRequest, CloudAccount,
    CloudAccountCreateRequest, CloudAccountUpdateRequest, CloudProviderRegions, DataPlane,
    DataPlaneCreateRequest, ObjectStorage, ObjectStorageCreateRequest, ObjectStorageUpdateRequest,
    Page, PageQuery, TaskResponse,
};

pub const ENDPOINT: &str = "infra-connector";

const K8S_CLUSTER: &str = "k8s-cluster";
const RESOURCE: &str = "resource";
const CLOUD_ACCOUNT: &str = "account";
const TYPES: &str = "types";
const CLOUD_PROVIDERS: &str = "cloud-providers";
const CERTIFICATE: &str = "certificate";
const INTERNAL: &str = "internal";
const OBJECT_STORE: &str = "objectstore";

#[derive(Debug, Clone, Default)]
pub struct CloudAccountsQuery {
    pub account_type: String,
    pub name: String,
}

impl ToQuery for CloudAccountsQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_non_empty("accountType", &self.account_type)
            .push_non_empty("name", &self.name);
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct CertificatesQuery {
    pub name: String,
    pub provider: String,
}

impl ToQuery for CertificatesQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_non_empty("name", &self.name)
            .push_non_empty("provider", &self.provider);
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataPlanesQuery {
    pub name: String,
}

impl ToQuery for DataPlanesQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_non_empty("name", &self.name);
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectStoragesQuery {
    pub name: String,
}

impl ToQuery for ObjectStoragesQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_non_empty("name", &self.name);
        params
    }
}

/// Capacity a data plane must offer, for [`InfraConnectorClient::regions_with_data_planes`].
#[derive(Debug, Clone, Default)]
pub struct DataPlaneRegionsQuery {
    pub provider: String,
    pub cpu: String,
    pub memory: String,
    pub storage: String,
    pub node_count: String,
}

impl ToQuery for DataPlaneRegionsQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("provider", &self.provider)
            .push("cpu", &self.cpu)
            .push("memory", &self.memory)
            .push("storage", &self.storage)
            .push("nodeCount", &self.node_count);
        params
    }
}

/// Cloud accounts, certificates, data planes and object storage
/// (`/api/infra-connector`).
#[derive(Clone)]
pub struct InfraConnectorClient {
    session: Arc<Session>,
    endpoint: String,
}

impl InfraConnectorClient {
    pub fn new(session: Arc<Session>) -> Self {
        let endpoint = session.endpoint(ENDPOINT);
        Self { session, endpoint }
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.endpoint.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    // cloud accounts

    pub async fn cloud_accounts(
        &self,
        query: &CloudAccountsQuery,
        page: PageQuery,
    ) -> Result<Page<CloudAccount>> {
        get_page(&self.session, &self.url(&[INTERNAL, CLOUD_ACCOUNT]), query, page).await
    }

    pub async fn all_cloud_accounts(&self, query: &CloudAccountsQuery) -> ListResult<CloudAccount> {
        get_all(&self.session, &self.url(&[INTERNAL, CLOUD_ACCOUNT]), query).await
    }

    pub async fn cloud_account(&self, id: &str) -> Result<CloudAccount> {
        require_id("cloud account", id)?;
        self.session.get(&self.url(&[CLOUD_ACCOUNT, id])).await
    }

    pub async fn create_cloud_account(
        &self,
        request: &CloudAccountCreateRequest,
    ) -> Result<CloudAccount> {
        self.session
            .send(Method::POST, &self.url(&[INTERNAL, CLOUD_ACCOUNT]), Some(request))
            .await?
            .json()
    }

    pub async fn update_cloud_account(
        &self,
        id: &str,
        request: &CloudAccountUpdateRequest,
    ) -> Result<()> {
        require_id("cloud account", id)?;
        self.session
            .send(Method::PUT, &self.url(&[CLOUD_ACCOUNT, id]), Some(request))
            .await?;
        Ok(())
    }

    pub async fn delete_cloud_account(&self, id: &str) -> Result<()> {
        require_id("cloud account", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.url(&[CLOUD_ACCOUNT, id]), None)
            .await?;
        Ok(())
    }

    /// Cloud provider types accounts can be created for.
    pub async fn provider_types(&self) -> Result<Vec<String>> {
        self.session.get(&self.url(&[CLOUD_ACCOUNT, TYPES])).await
    }

    // certificates

    pub async fn certificates(
        &self,
        query: &CertificatesQuery,
        page: PageQuery,
    ) -> Result<Page<Certificate>> {
        get_page(&self.session, &self.url(&[INTERNAL, CERTIFICATE]), query, page).await
    }

    pub async fn all_certificates(&self, query: &CertificatesQuery) -> ListResult<Certificate> {
        get_all(&self.session, &self.url(&[INTERNAL, CERTIFICATE]), query).await
    }

    pub async fn certificate(&self, id: &str) -> Result<Certificate> {
        require_id("certificate", id)?;
        self.session.get(&self.url(&[CERTIFICATE, id])).await
    }

    pub async fn create_certificate(&self, request: &CertificateCreateRequest) -> Result<Certificate> {
        self.session
            .send(Method::POST, &self.url(&[CERTIFICATE]), Some(request))
            .await?
            .json()
    }

    /// Rotates the certificate material. The API takes a `POST` on the entity.
    pub async fn update_certificate(
        &self,
        id: &str,
        request: &CertificateUpdateRequest,
    ) -> Result<Certificate> {
        require_id("certificate", id)?;
        self.session
            .send(Method::POST, &self.url(&[CERTIFICATE, id]), Some(request))
            .await?
            .json()
    }

    pub async fn delete_certificate(&self, id: &str) -> Result<()> {
        require_id("certificate", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.url(&[CERTIFICATE, id]), None)
            .await?;
        Ok(())
    }

    // data planes

    pub async fn data_planes(
        &self,
        query: &DataPlanesQuery,
        page: PageQuery,
    ) -> Result<Page<DataPlane>> {
        get_page(&self.session, &self.url(&[K8S_CLUSTER]), query, page).await
    }

    pub async fn all_data_planes(&self, query: &DataPlanesQuery) -> ListResult<DataPlane> {
        get_all(&self.session, &self.url(&[K8S_CLUSTER]), query).await
    }

    pub async fn data_plane(&self, id: &str) -> Result<DataPlane> {
        require_id("data plane", id)?;
        self.session.get(&self.url(&[K8S_CLUSTER, id])).await
    }

    /// Submits a create. The data plane is provisioned asynchronously.
    pub async fn create_data_plane(
        &self,
        request: &DataPlaneCreateRequest,
    ) -> Result<Option<TaskResponse>> {
        self.session
            .send(Method::POST, &self.url(&[K8S_CLUSTER]), Some(request))
            .await?
            .json_opt()
    }

    pub async fn delete_data_plane(&self, id: &str) -> Result<()> {
        require_id("data plane", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.url(&[K8S_CLUSTER, id]), None)
            .await?;
        Ok(())
    }

    /// Regions, keyed by provider, with a data plane that fits the query.
    pub async fn regions_with_data_planes(
        &self,
        query: &DataPlaneRegionsQuery,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let url = query.to_query().apply(&self.url(&[K8S_CLUSTER, RESOURCE]))?;
        self.session.get(&url).await
    }

    pub async fn cloud_provider_regions(&self) -> Result<Vec<CloudProviderRegions>> {
        self.session.get(&self.url(&[CLOUD_PROVIDERS])).await
    }

    // object storage

    pub async fn object_storages(
        &self,
        query: &ObjectStoragesQuery,
        page: PageQuery,
    ) -> Result<Page<ObjectStorage>> {
        get_page(&self.session, &self.url(&[OBJECT_STORE]), query, page).await
    }

    pub async fn all_object_storages(&self, query: &ObjectStoragesQuery) -> ListResult<ObjectStorage> {
        get_all(&self.session, &self.url(&[OBJECT_STORE]), query).await
    }

    pub async fn object_storage(&self, id: &str) -> Result<ObjectStorage> {
        require_id("object storage", id)?;
        self.session.get(&self.url(&[OBJECT_STORE, id])).await
    }

    pub async fn create_object_storage(
        &self,
        request: &ObjectStorageCreateRequest,
    ) -> Result<ObjectStorage> {
        self.session
            .send(Method::POST, &self.url(&[OBJECT_STORE]), Some(request))
            .await?
            .json()
    }

    /// Rotates the access keys. The API takes a `POST` on the entity.
    pub async fn update_object_storage(
        &self,
        id: &str,
        request: &ObjectStorageUpdateRequest,
    ) -> Result<ObjectStorage> {
        require_id("object storage", id)?;
        self.session
            .send(Method::POST, &self.url(&[OBJECT_STORE, id]), Some(request))
            .await?
            .json()
    }

    pub async fn delete_object_storage(&self, id: &str) -> Result<()> {
        require_id("object storage", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.url(&[OBJECT_STORE, id]), None)
            .await?;
        Ok(())
    }
}
