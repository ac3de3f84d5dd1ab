use super::repository::RepositoryError;

/// Failure taxonomy for every service operation. Each variant maps to exactly
/// one outward status class; the mapping itself lives in the HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("cannot create team: team already exists")]
    TeamExists,
    #[error("cannot create pull request: pull request already exists")]
    PullRequestExists,
    #[error("cannot edit pull request: it is already merged")]
    AlreadyMerged,
    #[error("cannot reassign reviewer: old reviewer is not assigned to this pull request")]
    ReviewerNotAssigned,
    #[error("cannot assign new reviewer: there are no available candidates")]
    NoAvailableCandidates,
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl ReviewError {
    /// Translate a repository failure where a missing row means the named
    /// entity does not exist. Conflicts are not expected on reads and fold
    /// into the storage passthrough.
    pub(crate) fn from_lookup(err: RepositoryError, entity: &'static str) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound { entity },
            RepositoryError::Conflict => Self::Storage("unexpected storage conflict".to_string()),
            RepositoryError::Unavailable(detail) => Self::Storage(detail),
        }
    }
}
