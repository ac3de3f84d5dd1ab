use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::auth::parse_auth_header;
use super::dto::{
    CreatePullRequestInput, CreateTeamInput, GetTeamInput, GetUserReviewsInput,
    MergePullRequestInput, ReassignReviewerInput, SetIsActiveInput,
};
use super::errors::ReviewError;
use super::observe::EventSink;
use super::policy::ReviewerPicker;
use super::repository::{PullRequestRepository, TeamRepository, UserRepository};
use super::service::ReviewService;

const CODE_TEAM_EXISTS: &str = "TEAM_EXISTS";
const CODE_PR_EXISTS: &str = "PR_EXISTS";
const CODE_PR_MERGED: &str = "PR_MERGED";
const CODE_NOT_ASSIGNED: &str = "NOT_ASSIGNED";
const CODE_NO_CANDIDATE: &str = "NO_CANDIDATE";
const CODE_NOT_FOUND: &str = "NOT_FOUND";
const CODE_VALIDATION: &str = "VALIDATION";
const CODE_INTERNAL: &str = "INTERNAL_ERROR";

fn error_body(code: &str, message: &str) -> Json<serde_json::Value> {
    Json(json!({ "error": { "code": code, "message": message } }))
}

/// Deterministic error-to-status mapping: validation and team conflicts are
/// bad requests, lifecycle conflicts are 409, missing rows are 404, storage
/// passthrough is internal.
fn error_response(err: ReviewError) -> Response {
    let (status, code) = match &err {
        ReviewError::MissingField { .. } => (StatusCode::BAD_REQUEST, CODE_VALIDATION),
        ReviewError::TeamExists => (StatusCode::BAD_REQUEST, CODE_TEAM_EXISTS),
        ReviewError::PullRequestExists => (StatusCode::CONFLICT, CODE_PR_EXISTS),
        ReviewError::AlreadyMerged => (StatusCode::CONFLICT, CODE_PR_MERGED),
        ReviewError::ReviewerNotAssigned => (StatusCode::CONFLICT, CODE_NOT_ASSIGNED),
        ReviewError::NoAvailableCandidates => (StatusCode::CONFLICT, CODE_NO_CANDIDATE),
        ReviewError::NotFound { .. } => (StatusCode::NOT_FOUND, CODE_NOT_FOUND),
        ReviewError::Storage(detail) => {
            warn!(%detail, "storage failure surfaced to client");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(CODE_INTERNAL, "internal error"),
            )
                .into_response();
        }
    };
    (status, error_body(code, &err.to_string())).into_response()
}

// Auth rejections reuse the NOT_FOUND code; the original wire contract does,
// and clients match on it.
fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        error_body(CODE_NOT_FOUND, message),
    )
        .into_response()
}

fn require_admin(headers: &HeaderMap) -> Result<(), Response> {
    match parse_auth_header(headers) {
        Ok(info) if info.is_admin => Ok(()),
        _ => Err(unauthorized("admin token required")),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamQuery {
    #[serde(default)]
    team_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserQuery {
    #[serde(default)]
    user_id: String,
}

/// HTTP adapter over the service façade. Transport concerns only: JSON
/// bodies, bearer tokens, and the error envelope.
pub fn review_router<T, U, P, K, S>(service: Arc<ReviewService<T, U, P, K, S>>) -> Router
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    Router::new()
        .route("/team/add", post(create_team_handler::<T, U, P, K, S>))
        .route("/team/get", get(get_team_handler::<T, U, P, K, S>))
        .route(
            "/users/setIsActive",
            post(set_is_active_handler::<T, U, P, K, S>),
        )
        .route(
            "/users/getReview",
            get(get_user_reviews_handler::<T, U, P, K, S>),
        )
        .route(
            "/pullRequest/create",
            post(create_pull_request_handler::<T, U, P, K, S>),
        )
        .route(
            "/pullRequest/merge",
            post(merge_pull_request_handler::<T, U, P, K, S>),
        )
        .route(
            "/pullRequest/reassign",
            post(reassign_reviewer_handler::<T, U, P, K, S>),
        )
        .with_state(service)
}

pub(crate) async fn create_team_handler<T, U, P, K, S>(
    State(service): State<Arc<ReviewService<T, U, P, K, S>>>,
    Json(input): Json<CreateTeamInput>,
) -> Response
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    match service.create_team(input) {
        Ok(team) => (StatusCode::CREATED, Json(json!({ "team": team }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_team_handler<T, U, P, K, S>(
    State(service): State<Arc<ReviewService<T, U, P, K, S>>>,
    headers: HeaderMap,
    Query(query): Query<TeamQuery>,
) -> Response
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    if parse_auth_header(&headers).is_err() {
        return unauthorized("auth token required");
    }

    match service.get_team(GetTeamInput {
        team_name: query.team_name,
    }) {
        Ok(team) => (StatusCode::OK, Json(json!({ "team": team }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn set_is_active_handler<T, U, P, K, S>(
    State(service): State<Arc<ReviewService<T, U, P, K, S>>>,
    headers: HeaderMap,
    Json(input): Json<SetIsActiveInput>,
) -> Response
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    if let Err(response) = require_admin(&headers) {
        return response;
    }

    match service.set_user_active(input) {
        Ok(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_user_reviews_handler<T, U, P, K, S>(
    State(service): State<Arc<ReviewService<T, U, P, K, S>>>,
    headers: HeaderMap,
    Query(query): Query<UserQuery>,
) -> Response
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    let auth = match parse_auth_header(&headers) {
        Ok(auth) => auth,
        Err(_) => return unauthorized("auth token required"),
    };

    // Non-admin callers can only read their own review queue.
    if !auth.is_admin && auth.user_id != query.user_id {
        return unauthorized("forbidden for this user_id");
    }

    match service.get_user_reviews(GetUserReviewsInput {
        user_id: query.user_id,
    }) {
        Ok(reviews) => (StatusCode::OK, Json(reviews)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_pull_request_handler<T, U, P, K, S>(
    State(service): State<Arc<ReviewService<T, U, P, K, S>>>,
    headers: HeaderMap,
    Json(input): Json<CreatePullRequestInput>,
) -> Response
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    if let Err(response) = require_admin(&headers) {
        return response;
    }

    match service.create_pull_request(input) {
        Ok(pr) => (StatusCode::CREATED, Json(json!({ "pr": pr }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn merge_pull_request_handler<T, U, P, K, S>(
    State(service): State<Arc<ReviewService<T, U, P, K, S>>>,
    headers: HeaderMap,
    Json(input): Json<MergePullRequestInput>,
) -> Response
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    if let Err(response) = require_admin(&headers) {
        return response;
    }

    match service.merge_pull_request(input) {
        Ok(pr) => (StatusCode::OK, Json(json!({ "pr": pr }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reassign_reviewer_handler<T, U, P, K, S>(
    State(service): State<Arc<ReviewService<T, U, P, K, S>>>,
    headers: HeaderMap,
    Json(input): Json<ReassignReviewerInput>,
) -> Response
where
    T: TeamRepository + 'static,
    U: UserRepository + 'static,
    P: PullRequestRepository + 'static,
    K: ReviewerPicker + 'static,
    S: EventSink + 'static,
{
    if let Err(response) = require_admin(&headers) {
        return response;
    }

    match service.reassign_reviewer(input) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}
