mod common;

use common::{TOKEN_PATH, paged, test_token};
use mds_client::core::{MockReply, MockTransport};
use mds_client::http::{Method, StatusCode};
use mds_client::models::{
    ClusterNetworkPoliciesUpdateRequest, ClusterUpgradeMetadata, ClusterUpgradeRequest, PageQuery,
    ServiceAccountCreateRequest, UserCreateRequest,
};
use mds_client::services::{ServiceAccountsQuery, UsersQuery};
use mds_client::{ClientConfig, ClientError, Credential, MdsClient};
use std::sync::Arc;

async fn client_over(mock: &Arc<MockTransport>) -> MdsClient {
    mock.on(
        Method::POST,
        TOKEN_PATH,
        MockReply::text(StatusCode::OK, &test_token()),
    );
    MdsClient::with_transport(
        &ClientConfig::for_host("https://mds.test"),
        Credential::api_token("key"),
        mock.clone(),
    )
    .await
    .expect("client")
}

fn body_of(mock: &MockTransport) -> serde_json::Value {
    let request = mock.last_request().expect("a request");
    serde_json::from_slice(request.body.as_deref().expect("a body")).expect("json body")
}

#[tokio::test]
async fn blank_ids_are_rejected_before_any_call() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    let calls = mock.call_count();

    let errors = vec![
        client.controller.cluster(" ").await.err(),
        client.controller.delete_cluster("").await.err(),
        client.infra_connector.data_plane("").await.err(),
        client.infra_connector.cloud_account("").await.err(),
        client.customer_metadata.user("").await.err(),
        client.customer_metadata.policy("").await.err(),
        client
            .controller
            .update_cluster_network_policies("", &ClusterNetworkPoliciesUpdateRequest::default())
            .await
            .err(),
    ];

    for err in errors {
        assert!(matches!(err, Some(ClientError::InvalidArgument(_))));
    }
    assert_eq!(mock.call_count(), calls);
}

#[tokio::test]
async fn zero_page_size_defaults_to_one_hundred() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    mock.on(
        Method::GET,
        "/api/customermetadata/users",
        MockReply::json(
            StatusCode::OK,
            &paged("mdsUserDTOes", serde_json::json!([]), 0, 100, 0),
        ),
    );

    client
        .customer_metadata
        .users(
            &UsersQuery {
                emails: vec!["a@x.io".to_string(), "b@x.io".to_string()],
                ..Default::default()
            },
            PageQuery::default(),
        )
        .await
        .expect("users");

    let url = mock.last_request().unwrap().url;
    assert_eq!(
        url,
        "https://mds.test/api/customermetadata/users?accountType=USER_ACCOUNT&email=a%40x.io&email=b%40x.io&page=0&size=100"
    );
}

#[tokio::test]
async fn service_accounts_share_the_users_collection() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    mock.on(
        Method::GET,
        "/api/customermetadata/users",
        MockReply::json(
            StatusCode::OK,
            &paged(
                "mdsUserDTOes",
                serde_json::json!([{"id": "sa-1", "name": "ci-bot", "status": "ACTIVE"}]),
                0,
                100,
                1,
            ),
        ),
    );
    mock.on(
        Method::POST,
        "/api/customermetadata/users",
        MockReply::empty(StatusCode::OK),
    );

    client
        .customer_metadata
        .create_service_accounts(&ServiceAccountCreateRequest {
            account_type: "ignored".to_string(),
            usernames: vec!["ci-bot".to_string()],
            ..Default::default()
        })
        .await
        .expect("create");
    assert_eq!(body_of(&mock)["accountType"], "SERVICE_ACCOUNT");

    let accounts = client
        .customer_metadata
        .all_service_accounts(&ServiceAccountsQuery {
            names: vec!["ci-bot".to_string()],
        })
        .await
        .expect("list");

    assert_eq!(accounts.len(), 1);
    assert!(
        mock.last_request()
            .unwrap()
            .url
            .contains("accountType=SERVICE_ACCOUNT&name=ci-bot")
    );
}

#[tokio::test]
async fn create_users_forces_user_account_type() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    mock.on(
        Method::POST,
        "/api/customermetadata/users",
        MockReply::empty(StatusCode::OK),
    );

    client
        .customer_metadata
        .create_users(&UserCreateRequest {
            usernames: vec!["dev@x.io".to_string()],
            ..Default::default()
        })
        .await
        .expect("create users");

    let body = body_of(&mock);
    assert_eq!(body["accountType"], "USER_ACCOUNT");
    assert_eq!(body["usernames"], serde_json::json!(["dev@x.io"]));
}

#[tokio::test]
async fn cluster_tags_are_patched_as_a_bare_list() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    mock.on(
        Method::PATCH,
        "/api/controller/mdsclusters/c-1",
        MockReply::json(
            StatusCode::OK,
            &serde_json::json!({"id": "c-1", "tags": ["prod", "eu"]}),
        ),
    );

    let cluster = client
        .controller
        .update_cluster_tags("c-1", &["prod".to_string(), "eu".to_string()])
        .await
        .expect("patch");

    assert_eq!(cluster.tags, vec!["prod", "eu"]);
    assert_eq!(body_of(&mock), serde_json::json!(["prod", "eu"]));
}

#[tokio::test]
async fn patch_with_empty_body_is_an_error() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    mock.on(
        Method::PATCH,
        "/api/controller/mdsclusters/c-1",
        MockReply::empty(StatusCode::OK),
    );

    let err = client
        .controller
        .update_cluster_tags("c-1", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::EmptyBody { .. }));
}

#[tokio::test]
async fn reauthenticate_replaces_token() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;

    client.reauthenticate().await.expect("reauthenticate");

    assert_eq!(mock.calls_to(&Method::POST, TOKEN_PATH), 2);
    assert!(client.session().is_authenticated().await);
}

#[tokio::test]
async fn cluster_upgrade_posts_to_upgrade_service() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    mock.on(
        Method::POST,
        "/api/upgradeservice/upgrade",
        MockReply::json(StatusCode::OK, &serde_json::json!({ "success": true })),
    );

    let response = client
        .upgrade_service
        .upgrade_cluster(&ClusterUpgradeRequest {
            id: "c-1".to_string(),
            request_type: "UPGRADE".to_string(),
            target_version: "16.2".to_string(),
            metadata: ClusterUpgradeMetadata { omit_backup: true },
        })
        .await
        .expect("upgrade");

    assert!(response.success);
    assert_eq!(
        body_of(&mock),
        serde_json::json!({
            "id": "c-1",
            "requestType": "UPGRADE",
            "targetVersion": "16.2",
            "metadata": { "omitBackup": true }
        })
    );
}

#[tokio::test]
async fn cluster_upgrade_needs_id_and_version() {
    let mock = Arc::new(MockTransport::new());
    let client = client_over(&mock).await;
    let calls = mock.call_count();

    let without_id = client
        .upgrade_service
        .upgrade_cluster(&ClusterUpgradeRequest {
            target_version: "16.2".to_string(),
            ..Default::default()
        })
        .await;
    let without_version = client
        .upgrade_service
        .upgrade_cluster(&ClusterUpgradeRequest {
            id: "c-1".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(without_id, Err(ClientError::InvalidArgument(_))));
    assert!(matches!(without_version, Err(ClientError::InvalidArgument(_))));
    assert_eq!(mock.call_count(), calls);
}
