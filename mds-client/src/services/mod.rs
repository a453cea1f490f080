pub mod controller;
pub mod customer_metadata;
pub mod infra_connector;
pub mod service_metadata;
pub mod upgrade_service;

use serde::de::DeserializeOwned;

pub use controller::{ClustersQuery, ControllerClient, InstanceTypesQuery};
pub use customer_metadata::{
    CustomerMetadataClient, PoliciesQuery, ServiceAccountsQuery, UsersQuery,
};
pub use infra_connector::{
    CertificatesQuery, CloudAccountsQuery, DataPlaneRegionsQuery, DataPlanesQuery,
    InfraConnectorClient, ObjectStoragesQuery,
};
pub use service_metadata::{RolesQuery, ServiceMetadataClient};
pub use upgrade_service::UpgradeServiceClient;

use crate::core::{QueryParams, Session, ToQuery};
use crate::error::{ClientError, Result};
use crate::models::{Page, PageQuery, Paged};
use crate::utils::pagination::{PartialPages, collect_pages};

pub type ListResult<T> = std::result::Result<Vec<T>, PartialPages<T, ClientError>>;

/// Fails before any call when `id` is blank.
pub(crate) fn require_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ClientError::invalid_argument(format!(
            "{} id cannot be empty",
            kind
        )));
    }
    Ok(())
}

/// Fetches one page of a collection, defaulting the page size.
pub(crate) async fn get_page<T, Q>(
    session: &Session,
    url: &str,
    query: &Q,
    page: PageQuery,
) -> Result<Page<T>>
where
    T: DeserializeOwned,
    Q: ToQuery + ?Sized,
{
    let mut params: QueryParams = query.to_query();
    params.page(page.with_default_size());
    let url = params.apply(url)?;

    let paged: Paged<T> = session.get(&url).await?;
    Ok(paged.into_page())
}

/// Every item of a collection, walking pages from the first one.
pub(crate) async fn get_all<T, Q>(session: &Session, url: &str, query: &Q) -> ListResult<T>
where
    T: DeserializeOwned,
    Q: ToQuery + ?Sized,
{
    let start = PageQuery::default().with_default_size();
    collect_pages(start, |page| get_page(session, url, query, page)).await
}
