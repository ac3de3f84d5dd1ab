use std::sync::Arc;

use super::domain::PullRequest;
use super::errors::ReviewError;
use super::repository::{PullRequestRepository, RepositoryError};

/// State transitions for pull requests: `OPEN` at creation, reviewer slots
/// mutable while open, `MERGED` terminal.
pub struct Lifecycle<P> {
    prs: Arc<P>,
}

impl<P> Lifecycle<P>
where
    P: PullRequestRepository,
{
    pub fn new(prs: Arc<P>) -> Self {
        Self { prs }
    }

    /// Persist a new pull request; the id must be unused.
    pub fn create(&self, pr: &PullRequest) -> Result<(), ReviewError> {
        self.prs.create_pull_request(pr).map_err(|err| match err {
            RepositoryError::Conflict => ReviewError::PullRequestExists,
            RepositoryError::NotFound => ReviewError::NotFound {
                entity: "pull request",
            },
            RepositoryError::Unavailable(detail) => ReviewError::Storage(detail),
        })
    }

    pub fn load(&self, pr_id: &str) -> Result<PullRequest, ReviewError> {
        self.prs
            .get_pull_request(pr_id)
            .map_err(|err| ReviewError::from_lookup(err, "pull request"))
    }

    /// Apply the terminal state. Merging an already merged pull request
    /// re-applies it; only an unknown id fails.
    pub fn merge(&self, pr_id: &str) -> Result<PullRequest, ReviewError> {
        self.prs
            .merge_pull_request(pr_id)
            .map_err(|err| ReviewError::from_lookup(err, "pull request"))
    }

    /// Everything the user reviews, oldest first.
    pub fn reviewed_by(&self, user_id: &str) -> Result<Vec<PullRequest>, ReviewError> {
        self.prs
            .list_by_reviewer(user_id)
            .map_err(|err| ReviewError::from_lookup(err, "pull request"))
    }

    /// Swap the slot and return the updated pull request.
    pub fn replace_reviewer(
        &self,
        pr_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<PullRequest, ReviewError> {
        self.prs
            .replace_reviewer(pr_id, old_user_id, new_user_id)
            .map_err(|err| ReviewError::from_lookup(err, "reviewer assignment"))?;
        self.load(pr_id)
    }
}

/// Guard that a reviewer swap is legal for this pull request: it must be
/// open and the outgoing reviewer must occupy a slot. Checked in this order
/// so a merged pull request always reports `AlreadyMerged`.
pub fn ensure_reassignable(pr: &PullRequest, old_user_id: &str) -> Result<(), ReviewError> {
    if pr.is_merged() {
        return Err(ReviewError::AlreadyMerged);
    }
    if !pr.has_reviewer(old_user_id) {
        return Err(ReviewError::ReviewerNotAssigned);
    }
    Ok(())
}
