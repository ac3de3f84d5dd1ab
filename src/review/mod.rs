//! Reviewer assignment and pull request lifecycle engine.
//!
//! The service façade ([`ReviewService`]) composes the team/user directory,
//! the reviewer selection policy, and the pull request state machine over
//! repository traits with a single in-process production implementation
//! ([`InMemoryStore`]). The HTTP adapter in [`router`] is a thin translation
//! layer and holds no business rules.

pub mod auth;
pub mod directory;
pub mod domain;
pub mod dto;
pub mod errors;
pub mod lifecycle;
pub mod memory;
pub mod observe;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{status_label, PullRequest, PullRequestStatus, Team, User, MAX_REVIEWER_SLOTS};
pub use dto::{
    CreatePullRequestInput, CreateTeamInput, GetTeamInput, GetUserReviewsInput,
    MergePullRequestInput, PullRequestShortView, PullRequestView, ReassignReviewerInput,
    ReassignReviewerView, SetIsActiveInput, TeamMemberDto, TeamView, UserReviewsView, UserView,
};
pub use errors::ReviewError;
pub use memory::InMemoryStore;
pub use observe::{EventSink, MetricsSink};
pub use policy::{ReviewerPicker, ThreadRngPicker};
pub use repository::{
    PullRequestRepository, RepositoryError, TeamRepository, UserRepository,
};
pub use router::review_router;
pub use service::ReviewService;
