//! Integration tests for the WebLab project API.

mod support;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use support::{setup_test_server, ACCOUNT};

async fn create_project(server: &TestServer, account: Option<&str>, body: Value) -> Value {
    let mut request = server.post("/api/project").json(&body);
    if let Some(account) = account {
        request = request.add_header(ACCOUNT, account);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_project_lifecycle() {
    let (server, _temp) = setup_test_server();

    let project = create_project(
        &server,
        Some("alice"),
        json!({
            "name": "Landing",
            "html": "<h1>Hi</h1>",
            "css": "h1{color:red}",
            "js": "console.log(1)",
            "is_public": true
        }),
    )
    .await;
    let id = project["id"].as_str().expect("id").to_string();
    assert_eq!(project["user_id"], "alice");
    assert_eq!(project["is_public"], true);

    let fetched: Value = server.get(&format!("/api/project/{}", id)).await.json();
    assert_eq!(fetched["html"], "<h1>Hi</h1>");
    assert_eq!(fetched["name"], "Landing");

    let updated = server
        .put(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "css": "h1{color:blue}", "name": "  " }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let updated: Value = updated.json();
    assert_eq!(updated["css"], "h1{color:blue}");
    assert_eq!(updated["html"], "<h1>Hi</h1>");
    assert_eq!(updated["name"], "Untitled Project");
    assert_eq!(updated["user_id"], "alice");

    let deleted = server
        .delete(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "alice")
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let missing = server.get(&format!("/api/project/{}", id)).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    let body: Value = missing.json();
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn anonymous_private_project_is_rejected() {
    let (server, _temp) = setup_test_server();
    let response = server
        .post("/api/project")
        .json(&json!({ "name": "secret", "is_public": false }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().expect("message").contains("sign in"));
}

#[tokio::test]
async fn oversized_project_is_rejected() {
    let (server, _temp) = setup_test_server();
    let response = server
        .post("/api/project")
        .json(&json!({ "html": "x".repeat(64 * 1024 + 1) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn private_projects_are_hidden_from_other_accounts() {
    let (server, _temp) = setup_test_server();
    let project = create_project(
        &server,
        Some("alice"),
        json!({ "name": "private", "is_public": false }),
    )
    .await;
    let id = project["id"].as_str().expect("id");

    let anonymous = server.get(&format!("/api/project/{}", id)).await;
    assert_eq!(anonymous.status_code(), StatusCode::NOT_FOUND);

    let bob = server
        .get(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .await;
    assert_eq!(bob.status_code(), StatusCode::NOT_FOUND);

    let alice = server
        .get(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "alice")
        .await;
    assert_eq!(alice.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn non_owners_cannot_edit_or_delete_public_projects() {
    let (server, _temp) = setup_test_server();
    let project = create_project(&server, Some("alice"), json!({ "name": "public" })).await;
    let id = project["id"].as_str().expect("id");

    let update = server
        .put(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .json(&json!({ "html": "<p>defaced</p>" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::FORBIDDEN);

    let delete = server.delete(&format!("/api/project/{}", id)).await;
    assert_eq!(delete.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ownerless_project_can_be_deleted_by_anyone() {
    let (server, _temp) = setup_test_server();
    let project = create_project(&server, None, json!({ "name": "scratch" })).await;
    assert!(project["user_id"].is_null());
    let id = project["id"].as_str().expect("id");

    let delete = server
        .delete(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .await;
    assert_eq!(delete.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn list_and_stats_respect_visibility() {
    let (server, _temp) = setup_test_server();
    create_project(&server, Some("alice"), json!({ "name": "a-public" })).await;
    create_project(
        &server,
        Some("alice"),
        json!({ "name": "a-private", "is_public": false }),
    )
    .await;
    create_project(&server, Some("bob"), json!({ "name": "b-public" })).await;

    let anonymous: Vec<Value> = server.get("/api/projects").await.json();
    assert_eq!(anonymous.len(), 2);

    let alice: Vec<Value> = server
        .get("/api/projects")
        .add_header(ACCOUNT, "alice")
        .await
        .json();
    assert_eq!(alice.len(), 3);

    let mine: Vec<Value> = server
        .get("/api/projects")
        .add_query_param("mine", "true")
        .add_header(ACCOUNT, "alice")
        .await
        .json();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p["user_id"] == "alice"));

    let limited: Vec<Value> = server
        .get("/api/projects")
        .add_query_param("limit", "1")
        .await
        .json();
    assert_eq!(limited.len(), 1);

    let stats: Value = server
        .get("/api/stats")
        .add_header(ACCOUNT, "alice")
        .await
        .json();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["public"], 1);
    assert_eq!(stats["private"], 1);
    assert_eq!(stats["recent"].as_array().expect("recent").len(), 2);
}

#[tokio::test]
async fn versions_commit_list_and_fetch() {
    let (server, _temp) = setup_test_server();
    let project = create_project(
        &server,
        Some("alice"),
        json!({ "name": "history", "html": "<p>v0</p>" }),
    )
    .await;
    let id = project["id"].as_str().expect("id");
    let versions_path = format!("/api/project/{}/versions", id);

    let first: Value = server
        .post(&versions_path)
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "commit_message": "initial" }))
        .await
        .json();
    assert_eq!(first["version_number"], 1);
    assert_eq!(first["html"], "<p>v0</p>");

    let second: Value = server
        .post(&versions_path)
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "html": "<p>v1</p>", "commit_message": "second" }))
        .await
        .json();
    assert_eq!(second["version_number"], 2);

    let listed: Vec<Value> = server.get(&versions_path).await.json();
    let numbers: Vec<u64> = listed
        .iter()
        .map(|v| v["version_number"].as_u64().expect("number"))
        .collect();
    assert_eq!(numbers, vec![2, 1]);

    let one: Value = server.get(&format!("{}/1", versions_path)).await.json();
    assert_eq!(one["commit_message"], "initial");

    let missing = server.get(&format!("{}/9", versions_path)).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let forbidden = server
        .post(&versions_path)
        .add_header(ACCOUNT, "bob")
        .json(&json!({ "commit_message": "nope" }))
        .await;
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn collaborators_grant_and_revoke_access() {
    let (server, _temp) = setup_test_server();
    let project = create_project(
        &server,
        Some("alice"),
        json!({ "name": "team", "is_public": false }),
    )
    .await;
    let id = project["id"].as_str().expect("id");
    let collaborators_path = format!("/api/project/{}/collaborators", id);

    let added = server
        .post(&collaborators_path)
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "user_id": "bob", "permission_level": "view" }))
        .await;
    assert_eq!(added.status_code(), StatusCode::OK);
    let added: Value = added.json();
    assert_eq!(added["permission_level"], "view");

    let duplicate = server
        .post(&collaborators_path)
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "user_id": "bob", "permission_level": "edit" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let bob_view = server
        .get(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .await;
    assert_eq!(bob_view.status_code(), StatusCode::OK);

    let bob_edit = server
        .put(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .json(&json!({ "html": "<p>bob</p>" }))
        .await;
    assert_eq!(bob_edit.status_code(), StatusCode::FORBIDDEN);

    let bob_manage = server
        .post(&collaborators_path)
        .add_header(ACCOUNT, "bob")
        .json(&json!({ "user_id": "carol", "permission_level": "view" }))
        .await;
    assert_eq!(bob_manage.status_code(), StatusCode::FORBIDDEN);

    let promoted = server
        .put(&format!("{}/bob", collaborators_path))
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "permission_level": "edit" }))
        .await;
    assert_eq!(promoted.status_code(), StatusCode::OK);

    let bob_edit = server
        .put(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .json(&json!({ "html": "<p>bob</p>" }))
        .await;
    assert_eq!(bob_edit.status_code(), StatusCode::OK);

    let listed: Vec<Value> = server
        .get(&collaborators_path)
        .add_header(ACCOUNT, "alice")
        .await
        .json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["user_id"], "bob");

    let bob_delete = server
        .delete(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .await;
    assert_eq!(bob_delete.status_code(), StatusCode::FORBIDDEN);

    let removed = server
        .delete(&format!("{}/bob", collaborators_path))
        .add_header(ACCOUNT, "alice")
        .await;
    assert_eq!(removed.status_code(), StatusCode::OK);

    let bob_view = server
        .get(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .await;
    assert_eq!(bob_view.status_code(), StatusCode::NOT_FOUND);

    let owner_as_collaborator = server
        .post(&collaborators_path)
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "user_id": "alice", "permission_level": "admin" }))
        .await;
    assert_eq!(owner_as_collaborator.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn edit_collaborator_may_resend_unchanged_visibility() {
    let (server, _temp) = setup_test_server();
    let project = create_project(
        &server,
        Some("alice"),
        json!({ "name": "shared", "is_public": true }),
    )
    .await;
    let id = project["id"].as_str().expect("id");

    let granted = server
        .post(&format!("/api/project/{}/collaborators", id))
        .add_header(ACCOUNT, "alice")
        .json(&json!({ "user_id": "bob", "permission_level": "edit" }))
        .await;
    assert_eq!(granted.status_code(), StatusCode::OK);

    let saved = server
        .put(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .json(&json!({ "html": "<p>b</p>", "css": "", "js": "", "is_public": true }))
        .await;
    assert_eq!(saved.status_code(), StatusCode::OK);
    let saved: Value = saved.json();
    assert_eq!(saved["html"], "<p>b</p>");
    assert_eq!(saved["is_public"], true);
    assert_eq!(saved["user_id"], "alice");

    let hidden = server
        .put(&format!("/api/project/{}", id))
        .add_header(ACCOUNT, "bob")
        .json(&json!({ "is_public": false }))
        .await;
    assert_eq!(hidden.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn api_responses_carry_security_headers() {
    let (server, _temp) = setup_test_server();
    let response = server.get("/api/templates").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.assert_header("x-content-type-options", "nosniff");
    response.assert_header("x-frame-options", "SAMEORIGIN");
    response.assert_contains_header("content-security-policy");
}

#[tokio::test]
async fn cors_allows_configured_origins_only() {
    let (server, _temp) = setup_test_server();
    let allowed = server
        .get("/api/templates")
        .add_header("origin", support::TEST_ORIGIN)
        .await;
    allowed.assert_header("access-control-allow-origin", support::TEST_ORIGIN);

    let denied = server
        .get("/api/templates")
        .add_header("origin", "http://example.com:3000")
        .await;
    assert!(!denied.contains_header("access-control-allow-origin"));
}
