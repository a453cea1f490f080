use std::sync::Arc;

use super::get_page;
use crate::core::{QueryParams, Session, ToQuery};
use crate::error::Result;
use crate::models::{NetworkPort, PageQuery, ServiceRoles};

pub const ENDPOINT: &str = "servicemetadata";

const MDS_SERVICES: &str = "mdsservices";
const ROLES: &str = "roles";
const NETWORK_PORTS: &str = "networkports";
const POLICIES: &str = "policies";
const TYPES: &str = "types";

#[derive(Debug, Clone, Default)]
pub struct RolesQuery {
    pub service_type: String,
}

impl ToQuery for RolesQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_non_empty("serviceType", &self.service_type);
        params
    }
}

/// Read-only catalogue of roles, ports and policy types (`/api/servicemetadata`).
#[derive(Clone)]
pub struct ServiceMetadataClient {
    session: Arc<Session>,
    endpoint: String,
}

impl ServiceMetadataClient {
    pub fn new(session: Arc<Session>) -> Self {
        let endpoint = session.endpoint(ENDPOINT);
        Self { session, endpoint }
    }

    /// Roles per service type. The catalogue fits in one page.
    pub async fn roles(&self, query: &RolesQuery) -> Result<Vec<ServiceRoles>> {
        let url = format!("{}/{}/{}", self.endpoint, MDS_SERVICES, ROLES);
        let page = get_page(&self.session, &url, query, PageQuery::default()).await?;
        Ok(page.items)
    }

    pub async fn network_ports(&self) -> Result<Vec<NetworkPort>> {
        let url = format!("{}/{}/{}", self.endpoint, MDS_SERVICES, NETWORK_PORTS);
        self.session.get(&url).await
    }

    pub async fn policy_types(&self) -> Result<Vec<String>> {
        let url = format!("{}/{}/{}/{}", self.endpoint, MDS_SERVICES, POLICIES, TYPES);
        self.session.get(&url).await
    }
}
