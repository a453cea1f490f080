use http::Method;
use std::sync::Arc;

use super::{ListResult, get_all, get_page, require_id};
use crate::core::{QueryParams, Session, ToQuery};
use crate::error::Result;
use crate::models::{
    Cluster, ClusterCreateRequest, ClusterNetworkPoliciesUpdateRequest, InstanceType,
    InstanceTypeList, Page, PageQuery, TaskResponse,
};

pub const ENDPOINT: &str = "controller";

const CLUSTERS: &str = "mdsclusters";
const SERVICES: &str = "mdsservices";
const INSTANCE_TYPES: &str = "instanceTypes";
const NETWORK_POLICY: &str = "networkpolicy";

#[derive(Debug, Clone, Default)]
pub struct ClustersQuery {
    pub service_type: String,
    pub name: String,
    /// Match `name` as a whole word instead of a substring.
    pub full_name_match: bool,
}

impl ToQuery for ClustersQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("serviceType", &self.service_type)
            .push_non_empty("name", &self.name)
            .push_flag("MATCH_FULL_WORD", self.full_name_match);
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstanceTypesQuery {
    pub service_type: String,
}

impl ToQuery for InstanceTypesQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("serviceType", &self.service_type);
        params
    }
}

/// Clusters and service catalogue (`/api/controller`).
#[derive(Clone)]
pub struct ControllerClient {
    session: Arc<Session>,
    endpoint: String,
}

impl ControllerClient {
    pub fn new(session: Arc<Session>) -> Self {
        let endpoint = session.endpoint(ENDPOINT);
        Self { session, endpoint }
    }

    fn clusters_url(&self) -> String {
        format!("{}/{}", self.endpoint, CLUSTERS)
    }

    fn cluster_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.endpoint, CLUSTERS, id)
    }

    pub async fn clusters(&self, query: &ClustersQuery, page: PageQuery) -> Result<Page<Cluster>> {
        get_page(&self.session, &self.clusters_url(), query, page).await
    }

    pub async fn all_clusters(&self, query: &ClustersQuery) -> ListResult<Cluster> {
        get_all(&self.session, &self.clusters_url(), query).await
    }

    pub async fn cluster(&self, id: &str) -> Result<Cluster> {
        require_id("cluster", id)?;
        self.session.get(&self.cluster_url(id)).await
    }

    /// Submits a create. The cluster is provisioned asynchronously.
    pub async fn create_cluster(&self, request: &ClusterCreateRequest) -> Result<Option<TaskResponse>> {
        self.session
            .send(Method::POST, &self.clusters_url(), Some(request))
            .await?
            .json_opt()
    }

    /// Replaces the cluster's tags.
    pub async fn update_cluster_tags(&self, id: &str, tags: &[String]) -> Result<Cluster> {
        require_id("cluster", id)?;
        self.session
            .send(Method::PATCH, &self.cluster_url(id), Some(tags))
            .await?
            .json()
    }

    pub async fn update_cluster_network_policies(
        &self,
        id: &str,
        request: &ClusterNetworkPoliciesUpdateRequest,
    ) -> Result<()> {
        require_id("cluster", id)?;
        let url = format!("{}/{}", self.cluster_url(id), NETWORK_POLICY);
        self.session.send(Method::PATCH, &url, Some(request)).await?;
        Ok(())
    }

    /// Submits a delete. Removal completes asynchronously.
    pub async fn delete_cluster(&self, id: &str) -> Result<Option<TaskResponse>> {
        require_id("cluster", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.cluster_url(id), None)
            .await?
            .json_opt()
    }

    pub async fn instance_types(&self, query: &InstanceTypesQuery) -> Result<Vec<InstanceType>> {
        let url = query
            .to_query()
            .apply(&format!("{}/{}/{}", self.endpoint, SERVICES, INSTANCE_TYPES))?;
        let list: InstanceTypeList = self.session.get(&url).await?;
        Ok(list.instance_types)
    }
}
