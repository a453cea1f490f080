use http::Method;
use std::sync::Arc;

use super::{ListResult, get_all, get_page, require_id};
use crate::core::{QueryParams, Session, ToQuery};
use crate::error::Result;
use crate::models::{
    Page, PageQuery, Policy, PolicyRequest, SERVICE_ACCOUNT, ServiceAccount,
    ServiceAccountCreateRequest, ServiceAccountUpdateRequest, USER_ACCOUNT, User,
    UserCreateRequest, UserUpdateRequest,
};

pub const ENDPOINT: &str = "customermetadata";

const USERS: &str = "users";
const POLICIES: &str = "policies";

#[derive(Debug, Clone, Default)]
pub struct UsersQuery {
    pub emails: Vec<String>,
    pub names: Vec<String>,
}

impl ToQuery for UsersQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("accountType", USER_ACCOUNT)
            .push_all("email", &self.emails)
            .push_all("name", &self.names);
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceAccountsQuery {
    pub names: Vec<String>,
}

impl ToQuery for ServiceAccountsQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("accountType", SERVICE_ACCOUNT)
            .push_all("name", &self.names);
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct PoliciesQuery {
    pub service_type: String,
    pub names: Vec<String>,
    pub resource_id: String,
}

impl ToQuery for PoliciesQuery {
    fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_non_empty("serviceType", &self.service_type)
            .push_all("name", &self.names)
            .push_non_empty("resourceId", &self.resource_id);
        params
    }
}

/// Users, service accounts and policies (`/api/customermetadata`).
///
/// Users and service accounts share one collection told apart by `accountType`.
#[derive(Clone)]
pub struct CustomerMetadataClient {
    session: Arc<Session>,
    endpoint: String,
}

impl CustomerMetadataClient {
    pub fn new(session: Arc<Session>) -> Self {
        let endpoint = session.endpoint(ENDPOINT);
        Self { session, endpoint }
    }

    fn users_url(&self) -> String {
        format!("{}/{}", self.endpoint, USERS)
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.endpoint, USERS, id)
    }

    fn policies_url(&self) -> String {
        format!("{}/{}", self.endpoint, POLICIES)
    }

    fn policy_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.endpoint, POLICIES, id)
    }

    // users

    pub async fn users(&self, query: &UsersQuery, page: PageQuery) -> Result<Page<User>> {
        get_page(&self.session, &self.users_url(), query, page).await
    }

    pub async fn all_users(&self, query: &UsersQuery) -> ListResult<User> {
        get_all(&self.session, &self.users_url(), query).await
    }

    pub async fn user(&self, id: &str) -> Result<User> {
        require_id("user", id)?;
        self.session.get(&self.user_url(id)).await
    }

    /// Invites users. The response carries no entity; look the users up by email.
    pub async fn create_users(&self, request: &UserCreateRequest) -> Result<()> {
        let request = UserCreateRequest {
            account_type: USER_ACCOUNT.to_string(),
            ..request.clone()
        };
        self.session
            .send(Method::POST, &self.users_url(), Some(&request))
            .await?;
        Ok(())
    }

    pub async fn update_user(&self, id: &str, request: &UserUpdateRequest) -> Result<()> {
        require_id("user", id)?;
        self.session
            .send(Method::PATCH, &self.user_url(id), Some(request))
            .await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        require_id("user", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.user_url(id), None)
            .await?;
        Ok(())
    }

    // service accounts

    pub async fn service_accounts(
        &self,
        query: &ServiceAccountsQuery,
        page: PageQuery,
    ) -> Result<Page<ServiceAccount>> {
        get_page(&self.session, &self.users_url(), query, page).await
    }

    pub async fn all_service_accounts(&self, query: &ServiceAccountsQuery) -> ListResult<ServiceAccount> {
        get_all(&self.session, &self.users_url(), query).await
    }

    pub async fn service_account(&self, id: &str) -> Result<ServiceAccount> {
        require_id("service account", id)?;
        self.session.get(&self.user_url(id)).await
    }

    pub async fn create_service_accounts(&self, request: &ServiceAccountCreateRequest) -> Result<()> {
        let request = ServiceAccountCreateRequest {
            account_type: SERVICE_ACCOUNT.to_string(),
            ..request.clone()
        };
        self.session
            .send(Method::POST, &self.users_url(), Some(&request))
            .await?;
        Ok(())
    }

    pub async fn update_service_account(
        &self,
        id: &str,
        request: &ServiceAccountUpdateRequest,
    ) -> Result<()> {
        require_id("service account", id)?;
        self.session
            .send(Method::PATCH, &self.user_url(id), Some(request))
            .await?;
        Ok(())
    }

    pub async fn delete_service_account(&self, id: &str) -> Result<()> {
        require_id("service account", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.user_url(id), None)
            .await?;
        Ok(())
    }

    // policies

    pub async fn policies(&self, query: &PoliciesQuery, page: PageQuery) -> Result<Page<Policy>> {
        get_page(&self.session, &self.policies_url(), query, page).await
    }

    pub async fn all_policies(&self, query: &PoliciesQuery) -> ListResult<Policy> {
        get_all(&self.session, &self.policies_url(), query).await
    }

    pub async fn policy(&self, id: &str) -> Result<Policy> {
        require_id("policy", id)?;
        self.session.get(&self.policy_url(id)).await
    }

    pub async fn create_policy(&self, request: &PolicyRequest) -> Result<Policy> {
        self.session
            .send(Method::POST, &self.policies_url(), Some(request))
            .await?
            .json()
    }

    pub async fn update_policy(&self, id: &str, request: &PolicyRequest) -> Result<()> {
        require_id("policy", id)?;
        self.session
            .send(Method::PUT, &self.policy_url(id), Some(request))
            .await?;
        Ok(())
    }

    pub async fn delete_policy(&self, id: &str) -> Result<()> {
        require_id("policy", id)?;
        self.session
            .send::<()>(Method::DELETE, &self.policy_url(id), None)
            .await?;
        Ok(())
    }
}
