mod common;

use common::{paged, provider_over};
use mds_client::core::{HttpRequest, MockReply, MockTransport};
use mds_client::http::{Method, StatusCode};
use mds_provider::ManagedResource;
use mds_provider::resources::{ServiceAccountSpec, UserSpec};
use serde_json::json;
use std::sync::Arc;

const USERS: &str = "/api/customermetadata/users";
const USER_U1: &str = "/api/customermetadata/users/u-1";

fn user_json(status: &str) -> serde_json::Value {
    json!({ "id": "u-1", "email": "dev@x.io", "status": status, "tags": ["t"] })
}

fn body_json(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().expect("body")).expect("json body")
}

fn patch_body(mock: &MockTransport) -> serde_json::Value {
    let patch = mock
        .requests()
        .into_iter()
        .find(|request| request.method == Method::PATCH)
        .expect("a PATCH");
    body_json(&patch)
}

#[tokio::test]
async fn user_update_without_roles_keeps_current_roles() {
    let mock = Arc::new(MockTransport::new());
    let provider = provider_over(&mock).await;
    mock.on(Method::GET, USER_U1, MockReply::json(StatusCode::OK, &user_json("ACTIVE")));
    mock.on(Method::PATCH, USER_U1, MockReply::empty(StatusCode::OK));

    let user = provider
        .users()
        .update(
            "u-1",
            &UserSpec {
                email: "dev@x.io".to_string(),
                tags: vec!["t".to_string()],
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(user.id, "u-1");
    assert_eq!(patch_body(&mock), json!({ "tags": ["t"], "policyIds": [] }));
    assert_eq!(mock.calls_to(&Method::GET, USER_U1), 2);
}

#[tokio::test]
async fn user_update_sends_roles_for_active_user() {
    let mock = Arc::new(MockTransport::new());
    let provider = provider_over(&mock).await;
    mock.on(Method::GET, USER_U1, MockReply::json(StatusCode::OK, &user_json("ACTIVE")));
    mock.on(Method::PATCH, USER_U1, MockReply::empty(StatusCode::OK));

    provider
        .users()
        .update(
            "u-1",
            &UserSpec {
                email: "dev@x.io".to_string(),
                role_ids: vec!["admin".to_string()],
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(patch_body(&mock)["serviceRoles"], json!([{ "roleId": "admin" }]));
}

#[tokio::test]
async fn user_update_leaves_roles_of_invited_user() {
    let mock = Arc::new(MockTransport::new());
    let provider = provider_over(&mock).await;
    mock.on(Method::GET, USER_U1, MockReply::json(StatusCode::OK, &user_json("INVITED")));
    mock.on(Method::PATCH, USER_U1, MockReply::empty(StatusCode::OK));

    provider
        .users()
        .update(
            "u-1",
            &UserSpec {
                email: "dev@x.io".to_string(),
                role_ids: vec!["admin".to_string()],
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert!(patch_body(&mock).get("serviceRoles").is_none());
}

#[tokio::test]
async fn user_update_of_missing_user_sends_nothing() {
    let mock = Arc::new(MockTransport::new());
    let provider = provider_over(&mock).await;
    mock.on(
        Method::GET,
        USER_U1,
        MockReply::api_error(StatusCode::NOT_FOUND, "NOT_FOUND", "no such user"),
    );

    let diagnostic = provider
        .users()
        .update("u-1", &UserSpec::default())
        .await
        .unwrap_err();

    assert_eq!(diagnostic.summary, "Reading MDS user");
    assert_eq!(mock.calls_to(&Method::PATCH, USER_U1), 0);
}

#[tokio::test]
async fn user_delete_issues_one_delete() {
    let mock = Arc::new(MockTransport::new());
    let provider = provider_over(&mock).await;
    mock.on(Method::DELETE, USER_U1, MockReply::empty(StatusCode::OK));

    provider.users().delete("u-1").await.expect("delete");

    assert_eq!(mock.calls_to(&Method::DELETE, USER_U1), 1);
}

#[tokio::test]
async fn service_account_create_locates_by_exact_name() {
    let mock = Arc::new(MockTransport::new());
    let provider = provider_over(&mock).await;
    mock.on(Method::POST, USERS, MockReply::empty(StatusCode::OK));
    mock.on(
        Method::GET,
        USERS,
        MockReply::json(
            StatusCode::OK,
            &paged(
                "mdsUserDTOes",
                json!([
                    { "id": "sa-2", "name": "ci-bot-2", "status": "ACTIVE" },
                    { "id": "sa-1", "name": "ci-bot", "status": "ACTIVE" },
                ]),
                2,
            ),
        ),
    );

    let account = provider
        .service_accounts()
        .create(&ServiceAccountSpec {
            name: "ci-bot".to_string(),
            policy_ids: vec!["p-1".to_string()],
            ..Default::default()
        })
        .await
        .expect("create");

    assert_eq!(account.id, "sa-1");

    let requests = mock.requests();
    let created = requests
        .iter()
        .find(|request| request.method == Method::POST && request.url.ends_with(USERS))
        .expect("a create");
    let body = body_json(created);
    assert_eq!(body["accountType"], "SERVICE_ACCOUNT");
    assert_eq!(body["usernames"], json!(["ci-bot"]));
    assert_eq!(body["policyIds"], json!(["p-1"]));

    let lookup = mock.last_request().expect("a lookup");
    assert!(lookup.url.contains("accountType=SERVICE_ACCOUNT"));
    assert!(lookup.url.contains("name=ci-bot"));
}

#[tokio::test]
async fn service_account_update_patches_then_rereads() {
    let mock = Arc::new(MockTransport::new());
    let provider = provider_over(&mock).await;
    let account = "/api/customermetadata/users/sa-1";
    mock.on(Method::PATCH, account, MockReply::empty(StatusCode::OK));
    mock.on(
        Method::GET,
        account,
        MockReply::json(StatusCode::OK, &json!({ "id": "sa-1", "name": "ci-bot", "tags": ["ops"] })),
    );

    let updated = provider
        .service_accounts()
        .update(
            "sa-1",
            &ServiceAccountSpec {
                name: "ci-bot".to_string(),
                tags: vec!["ops".to_string()],
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.tags, vec!["ops"]);
    assert_eq!(patch_body(&mock), json!({ "tags": ["ops"], "policyIds": [] }));
}
