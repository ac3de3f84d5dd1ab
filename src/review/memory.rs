use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{PullRequest, PullRequestStatus, Team, User, STATUS_MERGED};
use super::repository::{
    PullRequestRepository, RepositoryError, TeamRepository, UserRepository,
};

/// Stored pull request row. The status is kept as its raw code so reads go
/// through the same default-to-OPEN decoding as any other storage backend.
#[derive(Debug, Clone)]
struct PullRequestRow {
    pull_request_name: String,
    author_id: String,
    status_code: i16,
    reviewers: Vec<String>,
    created_seq: u64,
}

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<String>,
    users: HashMap<String, User>,
    /// (user_id, team_name) pairs; one row per membership link.
    memberships: Vec<(String, String)>,
    pull_requests: HashMap<String, PullRequestRow>,
    next_seq: u64,
}

/// Process-local storage backing all three repository contracts. One lock
/// spans every table, so multi-row writes commit as a unit and the reviewer
/// slot swap is atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_username(members: &mut [User]) {
    members.sort_by(|a, b| {
        a.username
            .cmp(&b.username)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
}

impl Tables {
    fn members_of(&self, team_name: &str) -> Vec<User> {
        let mut members: Vec<User> = self
            .memberships
            .iter()
            .filter(|(_, team)| team == team_name)
            .filter_map(|(user_id, _)| self.users.get(user_id).cloned())
            .collect();
        by_username(&mut members);
        members
    }

    /// First membership by team name; the directory model allows one team
    /// per user.
    fn team_of(&self, user_id: &str) -> Option<String> {
        self.memberships
            .iter()
            .filter(|(member, _)| member == user_id)
            .map(|(_, team)| team.clone())
            .min()
    }

    fn pull_request(&self, pr_id: &str) -> Option<PullRequest> {
        self.pull_requests.get(pr_id).map(|row| PullRequest {
            pull_request_id: pr_id.to_string(),
            pull_request_name: row.pull_request_name.clone(),
            author_id: row.author_id.clone(),
            status: PullRequestStatus::from_code(row.status_code),
            assigned_reviewers: row.reviewers.clone(),
        })
    }
}

impl TeamRepository for InMemoryStore {
    fn create_team(&self, team_name: &str, members: &[User]) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.teams.iter().any(|t| t == team_name) {
            return Err(RepositoryError::Conflict);
        }

        tables.teams.push(team_name.to_string());
        for member in members {
            tables
                .users
                .insert(member.user_id.clone(), member.clone());
            let link = (member.user_id.clone(), team_name.to_string());
            if !tables.memberships.contains(&link) {
                tables.memberships.push(link);
            }
        }
        Ok(())
    }

    fn get_team(&self, team_name: &str) -> Result<(Team, Vec<User>), RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        if !tables.teams.iter().any(|t| t == team_name) {
            return Err(RepositoryError::NotFound);
        }
        let members = tables.members_of(team_name);
        Ok((
            Team {
                team_name: team_name.to_string(),
            },
            members,
        ))
    }
}

impl UserRepository for InMemoryStore {
    fn get_user(&self, user_id: &str) -> Result<User, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        tables
            .users
            .get(user_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn set_is_active(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> Result<(User, String), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let user = match tables.users.get_mut(user_id) {
            Some(user) => {
                user.is_active = is_active;
                user.clone()
            }
            None => return Err(RepositoryError::NotFound),
        };
        let team_name = tables.team_of(user_id).unwrap_or_default();
        Ok((user, team_name))
    }

    fn team_name_of(&self, user_id: &str) -> Result<String, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        tables.team_of(user_id).ok_or(RepositoryError::NotFound)
    }

    fn active_team_members(&self, team_name: &str) -> Result<Vec<User>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        let mut members: Vec<User> = tables
            .members_of(team_name)
            .into_iter()
            .filter(|user| user.is_active)
            .collect();
        by_username(&mut members);
        Ok(members)
    }
}

impl PullRequestRepository for InMemoryStore {
    fn create_pull_request(&self, pr: &PullRequest) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        if tables.pull_requests.contains_key(&pr.pull_request_id) {
            return Err(RepositoryError::Conflict);
        }
        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.pull_requests.insert(
            pr.pull_request_id.clone(),
            PullRequestRow {
                pull_request_name: pr.pull_request_name.clone(),
                author_id: pr.author_id.clone(),
                status_code: pr.status.code(),
                reviewers: pr.assigned_reviewers.clone(),
                created_seq: seq,
            },
        );
        Ok(())
    }

    fn get_pull_request(&self, pr_id: &str) -> Result<PullRequest, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        tables.pull_request(pr_id).ok_or(RepositoryError::NotFound)
    }

    fn merge_pull_request(&self, pr_id: &str) -> Result<PullRequest, RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        match tables.pull_requests.get_mut(pr_id) {
            Some(row) => row.status_code = STATUS_MERGED,
            None => return Err(RepositoryError::NotFound),
        }
        tables.pull_request(pr_id).ok_or(RepositoryError::NotFound)
    }

    fn list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>, RepositoryError> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        let mut rows: Vec<(u64, PullRequest)> = tables
            .pull_requests
            .iter()
            .filter(|(_, row)| row.reviewers.iter().any(|r| r == user_id))
            .map(|(id, row)| {
                (
                    row.created_seq,
                    tables.pull_request(id).expect("row just read"),
                )
            })
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, pr)| pr).collect())
    }

    fn replace_reviewer(
        &self,
        pr_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let row = tables
            .pull_requests
            .get_mut(pr_id)
            .ok_or(RepositoryError::NotFound)?;
        let slot = row
            .reviewers
            .iter()
            .position(|r| r == old_user_id)
            .ok_or(RepositoryError::NotFound)?;
        row.reviewers[slot] = new_user_id.to_string();
        Ok(())
    }
}
