use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::review::domain::{PullRequest, Team, User};
use crate::review::dto::{CreatePullRequestInput, CreateTeamInput, TeamMemberDto};
use crate::review::memory::InMemoryStore;
use crate::review::observe::EventSink;
use crate::review::policy::ReviewerPicker;
use crate::review::repository::{
    PullRequestRepository, RepositoryError, TeamRepository, UserRepository,
};
use crate::review::service::ReviewService;

/// Deterministic stand-in for the random reassignment pick: always the first
/// candidate.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct FirstPicker;

impl ReviewerPicker for FirstPicker {
    fn pick(&self, _len: usize) -> usize {
        0
    }
}

/// Sink capturing emitted business events by name, in order.
#[derive(Debug, Default)]
pub(super) struct RecordingSink {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingSink {
    pub(super) fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("sink mutex poisoned").clone()
    }

    fn record(&self, event: &'static str) {
        self.events.lock().expect("sink mutex poisoned").push(event);
    }
}

impl EventSink for RecordingSink {
    fn team_created(&self) {
        self.record("team_created");
    }

    fn user_activated(&self) {
        self.record("user_activated");
    }

    fn user_deactivated(&self) {
        self.record("user_deactivated");
    }

    fn pull_request_created(&self) {
        self.record("pull_request_created");
    }

    fn pull_request_merged(&self) {
        self.record("pull_request_merged");
    }

    fn reviewer_reassigned(&self) {
        self.record("reviewer_reassigned");
    }
}

/// Repository double whose every call fails, to prove validation happens
/// before storage and that storage failures pass through untranslated.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct UnavailableStore;

fn down<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("connection refused".to_string()))
}

impl TeamRepository for UnavailableStore {
    fn create_team(&self, _team_name: &str, _members: &[User]) -> Result<(), RepositoryError> {
        down()
    }

    fn get_team(&self, _team_name: &str) -> Result<(Team, Vec<User>), RepositoryError> {
        down()
    }
}

impl UserRepository for UnavailableStore {
    fn get_user(&self, _user_id: &str) -> Result<User, RepositoryError> {
        down()
    }

    fn set_is_active(
        &self,
        _user_id: &str,
        _is_active: bool,
    ) -> Result<(User, String), RepositoryError> {
        down()
    }

    fn team_name_of(&self, _user_id: &str) -> Result<String, RepositoryError> {
        down()
    }

    fn active_team_members(&self, _team_name: &str) -> Result<Vec<User>, RepositoryError> {
        down()
    }
}

impl PullRequestRepository for UnavailableStore {
    fn create_pull_request(&self, _pr: &PullRequest) -> Result<(), RepositoryError> {
        down()
    }

    fn get_pull_request(&self, _pr_id: &str) -> Result<PullRequest, RepositoryError> {
        down()
    }

    fn merge_pull_request(&self, _pr_id: &str) -> Result<PullRequest, RepositoryError> {
        down()
    }

    fn list_by_reviewer(&self, _user_id: &str) -> Result<Vec<PullRequest>, RepositoryError> {
        down()
    }

    fn replace_reviewer(
        &self,
        _pr_id: &str,
        _old_user_id: &str,
        _new_user_id: &str,
    ) -> Result<(), RepositoryError> {
        down()
    }
}

pub(super) type MemoryService =
    ReviewService<InMemoryStore, InMemoryStore, InMemoryStore, FirstPicker, RecordingSink>;

pub(super) fn build_service() -> (MemoryService, InMemoryStore, Arc<RecordingSink>) {
    let store = InMemoryStore::new();
    let sink = Arc::new(RecordingSink::default());
    let service = ReviewService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        FirstPicker,
        sink.clone(),
    );
    (service, store, sink)
}

pub(super) fn unavailable_service(
) -> ReviewService<UnavailableStore, UnavailableStore, UnavailableStore, FirstPicker, RecordingSink>
{
    ReviewService::new(
        Arc::new(UnavailableStore),
        Arc::new(UnavailableStore),
        Arc::new(UnavailableStore),
        FirstPicker,
        Arc::new(RecordingSink::default()),
    )
}

pub(super) fn member(id: &str, name: &str, active: bool) -> TeamMemberDto {
    TeamMemberDto {
        user_id: id.to_string(),
        username: name.to_string(),
        is_active: active,
    }
}

/// Team "payments": ann/bob/cody/dana with dana inactive. Display-name order
/// matches the u1..u4 id order.
pub(super) fn seed_payments(service: &MemoryService) {
    service
        .create_team(CreateTeamInput {
            team_name: "payments".to_string(),
            members: vec![
                member("u1", "ann", true),
                member("u2", "bob", true),
                member("u3", "cody", true),
                member("u4", "dana", false),
            ],
        })
        .expect("seed team creates");
}

pub(super) fn pr_input(id: &str, author: &str) -> CreatePullRequestInput {
    CreatePullRequestInput {
        pull_request_id: id.to_string(),
        pull_request_name: format!("{id} change"),
        author_id: author.to_string(),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("body is json")
}
