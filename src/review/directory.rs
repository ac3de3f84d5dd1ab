use std::sync::Arc;

use super::domain::{Team, User};
use super::errors::ReviewError;
use super::repository::{RepositoryError, TeamRepository, UserRepository};

/// Resolves team and user identity facts for the orchestration service.
pub struct Directory<T, U> {
    teams: Arc<T>,
    users: Arc<U>,
}

impl<T, U> Directory<T, U>
where
    T: TeamRepository,
    U: UserRepository,
{
    pub fn new(teams: Arc<T>, users: Arc<U>) -> Self {
        Self { teams, users }
    }

    /// Create a team and upsert its members as one atomic unit.
    pub fn create_team(&self, team_name: &str, members: &[User]) -> Result<(), ReviewError> {
        self.teams
            .create_team(team_name, members)
            .map_err(|err| match err {
                RepositoryError::Conflict => ReviewError::TeamExists,
                RepositoryError::NotFound => ReviewError::NotFound { entity: "team" },
                RepositoryError::Unavailable(detail) => ReviewError::Storage(detail),
            })
    }

    /// Team plus members in display-name order.
    pub fn get_team(&self, team_name: &str) -> Result<(Team, Vec<User>), ReviewError> {
        self.teams
            .get_team(team_name)
            .map_err(|err| ReviewError::from_lookup(err, "team"))
    }

    pub fn get_user(&self, user_id: &str) -> Result<User, ReviewError> {
        self.users
            .get_user(user_id)
            .map_err(|err| ReviewError::from_lookup(err, "user"))
    }

    /// Toggle activation; the returned team name is "" for users without a
    /// membership.
    pub fn set_user_active(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> Result<(User, String), ReviewError> {
        self.users
            .set_is_active(user_id, is_active)
            .map_err(|err| ReviewError::from_lookup(err, "user"))
    }

    /// The single team a user belongs to; missing membership is `NotFound`.
    pub fn resolve_team_of(&self, user_id: &str) -> Result<String, ReviewError> {
        self.users
            .team_name_of(user_id)
            .map_err(|err| ReviewError::from_lookup(err, "team"))
    }

    /// Active members of a team in display-name order; empty is fine.
    pub fn active_members_of(&self, team_name: &str) -> Result<Vec<User>, ReviewError> {
        self.users
            .active_team_members(team_name)
            .map_err(|err| ReviewError::from_lookup(err, "team"))
    }
}
