use super::common::*;
use crate::review::dto::MergePullRequestInput;
use crate::review::router::review_router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn json_request(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn payments_body() -> serde_json::Value {
    json!({
        "team_name": "payments",
        "members": [
            { "user_id": "u1", "username": "ann", "is_active": true },
            { "user_id": "u2", "username": "bob", "is_active": true },
            { "user_id": "u3", "username": "cody", "is_active": true },
        ]
    })
}

#[tokio::test]
async fn create_team_route_returns_created_team() {
    let (service, _, _) = build_service();
    let router = review_router(Arc::new(service));

    let response = router
        .oneshot(json_request("/team/add", None, payments_body()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["team"]["team_name"], "payments");
    assert_eq!(payload["team"]["members"][1]["username"], "bob");
}

#[tokio::test]
async fn create_team_route_maps_validation_and_conflict() {
    let (service, _, _) = build_service();
    let router = review_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request("/team/add", None, json!({ "team_name": "" })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"]["code"], "VALIDATION");

    let first = router
        .clone()
        .oneshot(json_request("/team/add", None, payments_body()))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::CREATED);

    let duplicate = router
        .oneshot(json_request("/team/add", None, payments_body()))
        .await
        .expect("route executes");
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(duplicate).await;
    assert_eq!(payload["error"]["code"], "TEAM_EXISTS");
}

#[tokio::test]
async fn get_team_route_requires_a_token() {
    let (service, _, _) = build_service();
    seed_payments(&service);
    let router = review_router(Arc::new(service));

    let anonymous = router
        .clone()
        .oneshot(get_request("/team/get?team_name=payments", None))
        .await
        .expect("route executes");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let as_user = router
        .clone()
        .oneshot(get_request("/team/get?team_name=payments", Some("user:u2")))
        .await
        .expect("route executes");
    assert_eq!(as_user.status(), StatusCode::OK);
    let payload = read_json_body(as_user).await;
    assert_eq!(payload["team"]["members"].as_array().map(Vec::len), Some(4));

    let missing = router
        .oneshot(get_request("/team/get?team_name=ghosts", Some("admin:u1")))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(missing).await;
    assert_eq!(payload["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn set_is_active_route_is_admin_only() {
    let (service, _, _) = build_service();
    seed_payments(&service);
    let router = review_router(Arc::new(service));

    let body = json!({ "user_id": "u2", "is_active": false });

    let as_user = router
        .clone()
        .oneshot(json_request("/users/setIsActive", Some("user:u2"), body.clone()))
        .await
        .expect("route executes");
    assert_eq!(as_user.status(), StatusCode::UNAUTHORIZED);

    let as_admin = router
        .oneshot(json_request("/users/setIsActive", Some("admin:root"), body))
        .await
        .expect("route executes");
    assert_eq!(as_admin.status(), StatusCode::OK);
    let payload = read_json_body(as_admin).await;
    assert_eq!(payload["user"]["user_id"], "u2");
    assert_eq!(payload["user"]["is_active"], false);
    assert_eq!(payload["user"]["team_name"], "payments");
}

#[tokio::test]
async fn get_review_route_limits_users_to_their_own_queue() {
    let (service, _, _) = build_service();
    seed_payments(&service);
    service
        .create_pull_request(pr_input("pr-1", "u1"))
        .expect("pr creates");
    let router = review_router(Arc::new(service));

    let other = router
        .clone()
        .oneshot(get_request("/users/getReview?user_id=u2", Some("user:u3")))
        .await
        .expect("route executes");
    assert_eq!(other.status(), StatusCode::UNAUTHORIZED);

    let own = router
        .clone()
        .oneshot(get_request("/users/getReview?user_id=u2", Some("user:u2")))
        .await
        .expect("route executes");
    assert_eq!(own.status(), StatusCode::OK);
    let payload = read_json_body(own).await;
    assert_eq!(payload["user_id"], "u2");
    assert_eq!(payload["pull_requests"][0]["pull_request_id"], "pr-1");

    let admin = router
        .oneshot(get_request("/users/getReview?user_id=u2", Some("admin:root")))
        .await
        .expect("route executes");
    assert_eq!(admin.status(), StatusCode::OK);
}

#[tokio::test]
async fn pull_request_routes_enforce_lifecycle_conflicts() {
    let (service, _, _) = build_service();
    seed_payments(&service);
    service
        .create_pull_request(pr_input("pr-1", "u1"))
        .expect("pr creates");
    service
        .merge_pull_request(MergePullRequestInput {
            pull_request_id: "pr-1".to_string(),
        })
        .expect("merge");
    let router = review_router(Arc::new(service));

    let duplicate = router
        .clone()
        .oneshot(json_request(
            "/pullRequest/create",
            Some("admin:root"),
            json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "again",
                "author_id": "u1",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    let payload = read_json_body(duplicate).await;
    assert_eq!(payload["error"]["code"], "PR_EXISTS");

    let reassign = router
        .oneshot(json_request(
            "/pullRequest/reassign",
            Some("admin:root"),
            json!({ "pull_request_id": "pr-1", "old_user_id": "u2" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(reassign.status(), StatusCode::CONFLICT);
    let payload = read_json_body(reassign).await;
    assert_eq!(payload["error"]["code"], "PR_MERGED");
}

#[tokio::test]
async fn pull_request_create_route_returns_assignment() {
    let (service, _, _) = build_service();
    seed_payments(&service);
    let router = review_router(Arc::new(service));

    let anonymous = router
        .clone()
        .oneshot(json_request(
            "/pullRequest/create",
            None,
            json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "rate limiter",
                "author_id": "u1",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let created = router
        .oneshot(json_request(
            "/pullRequest/create",
            Some("admin:root"),
            json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "rate limiter",
                "author_id": "u1",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let payload = read_json_body(created).await;
    assert_eq!(payload["pr"]["status"], "OPEN");
    assert_eq!(payload["pr"]["assigned_reviewers"], json!(["u2", "u3"]));
}

#[tokio::test]
async fn storage_failures_render_as_internal_error() {
    let service = unavailable_service();
    let router = review_router(Arc::new(service));

    let response = router
        .oneshot(get_request("/team/get?team_name=payments", Some("admin:root")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(payload["error"]["message"], "internal error");
}
