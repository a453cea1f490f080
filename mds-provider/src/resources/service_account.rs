use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{ServiceAccount, ServiceAccountCreateRequest, ServiceAccountUpdateRequest};
use mds_client::services::ServiceAccountsQuery;

use super::{ManagedResource, Timeouts, diagnose};
use crate::config::PollSettings;
use crate::diagnostics::Diagnostic;
use crate::error::ProviderError;
use crate::reconcile::await_located;

#[derive(Debug, Clone, Default)]
pub struct ServiceAccountSpec {
    pub name: String,
    pub policy_ids: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Clone)]
pub struct ServiceAccountResource {
    client: MdsClient,
    poll: PollSettings,
    timeouts: Timeouts,
}

impl ServiceAccountResource {
    pub fn new(client: MdsClient, poll: PollSettings) -> Self {
        Self {
            client,
            poll,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_timeouts(self, timeouts: Timeouts) -> Self {
        Self { timeouts, ..self }
    }
}

#[async_trait]
impl ManagedResource for ServiceAccountResource {
    type Desired = ServiceAccountSpec;
    type State = ServiceAccount;

    const KIND: &'static str = "service account";

    async fn create(&self, desired: &ServiceAccountSpec) -> Result<ServiceAccount, Diagnostic> {
        let target = self
            .timeouts
            .create_target(Self::KIND, &desired.name, self.poll.user_create());
        let customers = &self.client.customer_metadata;

        let request = ServiceAccountCreateRequest {
            usernames: vec![desired.name.clone()],
            policy_ids: desired.policy_ids.clone(),
            tags: desired.tags.clone(),
            ..Default::default()
        };
        customers
            .create_service_accounts(&request)
            .await
            .map_err(diagnose("Submitting request to create service account"))?;

        let query = ServiceAccountsQuery {
            names: vec![desired.name.clone()],
        };
        await_located(&target, || async move {
            customers
                .all_service_accounts(&query)
                .await
                .map(|accounts| {
                    accounts
                        .into_iter()
                        .filter(|account| account.name == desired.name)
                        .collect::<Vec<_>>()
                })
                .map_err(ProviderError::from)
        })
        .await
        .map_err(diagnose("Fetching created service account"))
    }

    async fn read(&self, id: &str) -> Result<ServiceAccount, Diagnostic> {
        self.client
            .customer_metadata
            .service_account(id)
            .await
            .map_err(diagnose("Reading service account"))
    }

    async fn update(&self, id: &str, desired: &ServiceAccountSpec) -> Result<ServiceAccount, Diagnostic> {
        let request = ServiceAccountUpdateRequest {
            tags: desired.tags.clone(),
            policy_ids: desired.policy_ids.clone(),
        };
        self.client
            .customer_metadata
            .update_service_account(id, &request)
            .await
            .map_err(diagnose("Updating service account"))?;

        self.read(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.client
            .customer_metadata
            .delete_service_account(id)
            .await
            .map_err(diagnose("Deleting service account"))
    }
}
