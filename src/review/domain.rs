use serde::{Deserialize, Serialize};

/// Upper bound on reviewer slots per pull request.
pub const MAX_REVIEWER_SLOTS: usize = 2;

/// Status code stored for an open pull request.
pub const STATUS_OPEN: i16 = 1;
/// Status code stored for a merged pull request.
pub const STATUS_MERGED: i16 = 2;

/// A directory user. Created on first team membership, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

/// A team is identified by its name; the name is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
}

/// Lifecycle status of a pull request. `Merged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullRequestStatus {
    Open,
    Merged,
}

impl PullRequestStatus {
    /// Decode a stored status code. Unknown codes read as `Open`; the
    /// original data format treats anything but 2 as an open pull request
    /// rather than corrupt data, and that behavior is kept here.
    pub const fn from_code(code: i16) -> Self {
        match code {
            STATUS_MERGED => Self::Merged,
            _ => Self::Open,
        }
    }

    pub const fn code(self) -> i16 {
        match self {
            Self::Open => STATUS_OPEN,
            Self::Merged => STATUS_MERGED,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

/// Wire/storage label for a raw status code, with the same default-to-OPEN
/// read as [`PullRequestStatus::from_code`].
pub fn status_label(code: i16) -> &'static str {
    PullRequestStatus::from_code(code).label()
}

/// A pull request and its reviewer slots. Slot order is assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
}

impl PullRequest {
    /// A freshly created pull request: open, with the reviewers chosen by the
    /// selection policy occupying slots in order.
    pub fn open(id: String, name: String, author_id: String, reviewers: Vec<String>) -> Self {
        debug_assert!(reviewers.len() <= MAX_REVIEWER_SLOTS);
        Self {
            pull_request_id: id,
            pull_request_name: name,
            author_id,
            status: PullRequestStatus::Open,
            assigned_reviewers: reviewers,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|r| r == user_id)
    }
}
