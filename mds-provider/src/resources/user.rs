use async_trait::async_trait;
use mds_client::MdsClient;
use mds_client::models::{RoleRequest, User, UserCreateRequest, UserUpdateRequest};
use mds_client::services::UsersQuery;

use super::{ManagedResource, Timeouts, diagnose};
use crate::config::PollSettings;
use crate::diagnostics::Diagnostic;
use crate::error::ProviderError;
use crate::reconcile::await_located;

const INVITED: &str = "INVITED";

#[derive(Debug, Clone, Default)]
pub struct UserSpec {
    pub email: String,
    pub role_ids: Vec<String>,
    pub policy_ids: Vec<String>,
    pub tags: Vec<String>,
}

impl UserSpec {
    fn roles(&self) -> Vec<RoleRequest> {
        self.role_ids
            .iter()
            .map(|role_id| RoleRequest {
                role_id: role_id.clone(),
            })
            .collect()
    }
}

/// Invited users, identified by email.
#[derive(Clone)]
pub struct UserResource {
    client: MdsClient,
    poll: PollSettings,
    timeouts: Timeouts,
}

impl UserResource {
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
impl ManagedResource for UserResource {
    type Desired = UserSpec;
    type State = User;

    const KIND: &'static str = "user";

    async fn create(&self, desired: &UserSpec) -> Result<User, Diagnostic> {
        let target = self
            .timeouts
            .create_target(Self::KIND, &desired.email, self.poll.user_create());
        let customers = &self.client.customer_metadata;

        let request = UserCreateRequest {
            usernames: vec![desired.email.clone()],
            service_roles: desired.roles(),
            policy_ids: desired.policy_ids.clone(),
            tags: desired.tags.clone(),
            ..Default::default()
        };
        customers
            .create_users(&request)
            .await
            .map_err(diagnose("Submitting request to create user"))?;

        let query = UsersQuery {
            emails: vec![desired.email.clone()],
            ..Default::default()
        };
        await_located(&target, || async move {
            customers
                .all_users(&query)
                .await
                .map(|users| {
                    users
                        .into_iter()
                        .filter(|user| user.email.eq_ignore_ascii_case(&desired.email))
                        .collect::<Vec<_>>()
                })
                .map_err(ProviderError::from)
        })
        .await
        .map_err(diagnose("Fetching created user"))
    }

    async fn read(&self, id: &str) -> Result<User, Diagnostic> {
        self.client
            .customer_metadata
            .user(id)
            .await
            .map_err(diagnose("Reading MDS user"))
    }

    /// Roles are sent only for a user who has accepted the invitation, and
    /// only when some are given; otherwise the user keeps its current roles.
    async fn update(&self, id: &str, desired: &UserSpec) -> Result<User, Diagnostic> {
        let current = self.read(id).await?;
        let service_roles = if current.status == INVITED || desired.role_ids.is_empty() {
            None
        } else {
            Some(desired.roles())
        };

        let request = UserUpdateRequest {
            tags: desired.tags.clone(),
            policy_ids: desired.policy_ids.clone(),
            service_roles,
        };
        self.client
            .customer_metadata
            .update_user(id, &request)
            .await
            .map_err(diagnose("Updating MDS user"))?;

        self.read(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.client
            .customer_metadata
            .delete_user(id)
            .await
            .map_err(diagnose("Deleting MDS user"))
    }
}
