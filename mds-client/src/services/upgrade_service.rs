use http::Method;
use std::sync::Arc;

use super::require_id;
use crate::core::Session;
use crate::error::{ClientError, Result};
use crate::models::{ClusterUpgradeRequest, ClusterUpgradeResponse};

pub const ENDPOINT: &str = "upgradeservice";

const UPGRADE: &str = "upgrade";

/// Cluster version upgrades (`/api/upgradeservice`).
#[derive(Clone)]
pub struct UpgradeServiceClient {
    session: Arc<Session>,
    endpoint: String,
}

impl UpgradeServiceClient {
    pub fn new(session: Arc<Session>) -> Self {
        let endpoint = session.endpoint(ENDPOINT);
        Self { session, endpoint }
    }

    /// Requests an upgrade of the cluster named in `request` to its target version.
    pub async fn upgrade_cluster(&self, request: &ClusterUpgradeRequest) -> Result<ClusterUpgradeResponse> {
        require_id("cluster", &request.id)?;
        if request.target_version.trim().is_empty() {
            return Err(ClientError::invalid_argument(
                "target version cannot be empty",
            ));
        }

        let url = format!("{}/{}", self.endpoint, UPGRADE);
        let response: ClusterUpgradeResponse = self
            .session
            .send(Method::POST, &url, Some(request))
            .await?
            .json()?;
        tracing::info!(
            cluster_id = %request.id,
            target_version = %request.target_version,
            accepted = response.success,
            "cluster upgrade requested"
        );
        Ok(response)
    }
}
