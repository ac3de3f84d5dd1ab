use super::domain::{PullRequest, Team, User};

/// Error enumeration for repository failures. Implementations must translate
/// "no row" conditions into `NotFound` rather than a generic error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Team storage. `create_team` is an atomic multi-row write: the team, every
/// member upsert, and every membership link land together or not at all.
pub trait TeamRepository: Send + Sync {
    fn create_team(&self, team_name: &str, members: &[User]) -> Result<(), RepositoryError>;

    /// Team plus members ordered by display name.
    fn get_team(&self, team_name: &str) -> Result<(Team, Vec<User>), RepositoryError>;
}

/// User identity and membership facts.
pub trait UserRepository: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User, RepositoryError>;

    /// Flip the activation flag and return the updated user together with the
    /// resolved team name ("" when the user has no membership).
    fn set_is_active(&self, user_id: &str, is_active: bool)
        -> Result<(User, String), RepositoryError>;

    /// The single team a user belongs to; `NotFound` when there is no
    /// membership row.
    fn team_name_of(&self, user_id: &str) -> Result<String, RepositoryError>;

    /// All active users of a team, ordered by display name. Empty is not an
    /// error.
    fn active_team_members(&self, team_name: &str) -> Result<Vec<User>, RepositoryError>;
}

/// Pull request storage. Concurrent reassignments of the same pull request
/// are not serialized by the service; the slot swap in `replace_reviewer`
/// must be atomic at this boundary.
pub trait PullRequestRepository: Send + Sync {
    /// `Conflict` when the pull request id is already taken.
    fn create_pull_request(&self, pr: &PullRequest) -> Result<(), RepositoryError>;

    fn get_pull_request(&self, pr_id: &str) -> Result<PullRequest, RepositoryError>;

    /// Apply the terminal merged state and return the stored row. Re-merging
    /// an already merged pull request re-applies the same state; only a
    /// missing row is `NotFound`.
    fn merge_pull_request(&self, pr_id: &str) -> Result<PullRequest, RepositoryError>;

    /// Every pull request where the user occupies a reviewer slot, ordered by
    /// creation time ascending.
    fn list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>, RepositoryError>;

    /// Swap the slot occupied by `old_user_id` to `new_user_id` in place;
    /// `NotFound` when no such slot row exists.
    fn replace_reviewer(
        &self,
        pr_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<(), RepositoryError>;
}
