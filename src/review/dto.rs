use serde::{Deserialize, Serialize};

use super::domain::{PullRequest, User};

/// Member payload shared by team creation and team lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberDto {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMemberDto {
    pub(crate) fn into_domain(self) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            is_active: self.is_active,
        }
    }

    pub(crate) fn from_domain(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTeamInput {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetTeamInput {
    pub team_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamView {
    pub team_name: String,
    pub members: Vec<TeamMemberDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetIsActiveInput {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub user_id: String,
    pub username: String,
    /// Empty when the user has no team; that is not an error.
    pub team_name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetUserReviewsInput {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestShortView {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserReviewsView {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortView>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePullRequestInput {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergePullRequestInput {
    pub pull_request_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReassignReviewerInput {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestView {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: &'static str,
    pub assigned_reviewers: Vec<String>,
}

impl PullRequestView {
    pub(crate) fn from_domain(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.pull_request_id,
            pull_request_name: pr.pull_request_name,
            author_id: pr.author_id,
            status: pr.status.label(),
            assigned_reviewers: pr.assigned_reviewers,
        }
    }
}

impl PullRequestShortView {
    pub(crate) fn from_domain(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.pull_request_id,
            pull_request_name: pr.pull_request_name,
            author_id: pr.author_id,
            status: pr.status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignReviewerView {
    pub pr: PullRequestView,
    pub replaced_by: String,
}
