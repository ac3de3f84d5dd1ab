use std::sync::Arc;

use tracing::info;

use super::directory::Directory;
use super::domain::PullRequest;
use super::dto::{
    CreatePullRequestInput, CreateTeamInput, GetTeamInput, GetUserReviewsInput,
    MergePullRequestInput, PullRequestShortView, PullRequestView, ReassignReviewerInput,
    ReassignReviewerView, SetIsActiveInput, TeamMemberDto, TeamView, UserReviewsView, UserView,
};
use super::errors::ReviewError;
use super::lifecycle::{ensure_reassignable, Lifecycle};
use super::observe::EventSink;
use super::policy::{self, ReviewerPicker};
use super::repository::{PullRequestRepository, TeamRepository, UserRepository};

/// Façade composing the directory, selection policy, and pull request
/// lifecycle behind one operation per inbound request. Every operation runs
/// the same pipeline: structural validation, directory lookups, mutation,
/// then a single business-event signal.
pub struct ReviewService<T, U, P, K, S> {
    directory: Directory<T, U>,
    lifecycle: Lifecycle<P>,
    picker: K,
    events: Arc<S>,
}

fn require(value: &str, field: &'static str) -> Result<(), ReviewError> {
    if value.is_empty() {
        return Err(ReviewError::MissingField { field });
    }
    Ok(())
}

impl<T, U, P, K, S> ReviewService<T, U, P, K, S>
where
    T: TeamRepository,
    U: UserRepository,
    P: PullRequestRepository,
    K: ReviewerPicker,
    S: EventSink,
{
    pub fn new(teams: Arc<T>, users: Arc<U>, prs: Arc<P>, picker: K, events: Arc<S>) -> Self {
        Self {
            directory: Directory::new(teams, users),
            lifecycle: Lifecycle::new(prs),
            picker,
            events,
        }
    }

    /// Create a team, upserting its members and linking their memberships as
    /// one unit. The response echoes the submitted member list.
    pub fn create_team(&self, input: CreateTeamInput) -> Result<TeamView, ReviewError> {
        require(&input.team_name, "team_name")?;

        let members: Vec<_> = input
            .members
            .iter()
            .cloned()
            .map(TeamMemberDto::into_domain)
            .collect();
        self.directory.create_team(&input.team_name, &members)?;

        info!(
            team_name = %input.team_name,
            members_count = input.members.len(),
            "team created"
        );
        self.events.team_created();

        Ok(TeamView {
            team_name: input.team_name,
            members: input.members,
        })
    }

    /// Team lookup; members come back ordered by display name.
    pub fn get_team(&self, input: GetTeamInput) -> Result<TeamView, ReviewError> {
        require(&input.team_name, "team_name")?;

        let (team, members) = self.directory.get_team(&input.team_name)?;

        Ok(TeamView {
            team_name: team.team_name,
            members: members.into_iter().map(TeamMemberDto::from_domain).collect(),
        })
    }

    /// Toggle a user's availability for review assignment.
    pub fn set_user_active(&self, input: SetIsActiveInput) -> Result<UserView, ReviewError> {
        require(&input.user_id, "user_id")?;

        let (user, team_name) = self
            .directory
            .set_user_active(&input.user_id, input.is_active)?;

        info!(
            user_id = %user.user_id,
            is_active = user.is_active,
            team_name = %team_name,
            "user activation updated"
        );
        if input.is_active {
            self.events.user_activated();
        } else {
            self.events.user_deactivated();
        }

        Ok(UserView {
            user_id: user.user_id,
            username: user.username,
            team_name,
            is_active: user.is_active,
        })
    }

    /// Every pull request where the user occupies a reviewer slot, oldest
    /// first.
    pub fn get_user_reviews(
        &self,
        input: GetUserReviewsInput,
    ) -> Result<UserReviewsView, ReviewError> {
        require(&input.user_id, "user_id")?;

        let prs = self.lifecycle.reviewed_by(&input.user_id)?;

        Ok(UserReviewsView {
            user_id: input.user_id,
            pull_requests: prs
                .into_iter()
                .map(PullRequestShortView::from_domain)
                .collect(),
        })
    }

    /// Open a pull request and assign up to two reviewers from the author's
    /// team: active members minus the author, first two in directory order.
    pub fn create_pull_request(
        &self,
        input: CreatePullRequestInput,
    ) -> Result<PullRequestView, ReviewError> {
        require(&input.pull_request_id, "pull_request_id")?;
        require(&input.pull_request_name, "pull_request_name")?;
        require(&input.author_id, "author_id")?;

        let author = self.directory.get_user(&input.author_id)?;
        let team_name = self.directory.resolve_team_of(&author.user_id)?;
        let members = self.directory.active_members_of(&team_name)?;
        let reviewers = policy::initial_reviewers(&members, &author.user_id);

        let pr = PullRequest::open(
            input.pull_request_id,
            input.pull_request_name,
            input.author_id,
            reviewers,
        );
        self.lifecycle.create(&pr)?;

        info!(
            pull_request_id = %pr.pull_request_id,
            author_id = %pr.author_id,
            assigned_reviewers = ?pr.assigned_reviewers,
            "pull request created"
        );
        self.events.pull_request_created();

        Ok(PullRequestView::from_domain(pr))
    }

    /// Move a pull request to its terminal state. Re-merging re-applies the
    /// same state and succeeds; only an unknown id fails.
    pub fn merge_pull_request(
        &self,
        input: MergePullRequestInput,
    ) -> Result<PullRequestView, ReviewError> {
        require(&input.pull_request_id, "pull_request_id")?;

        let pr = self.lifecycle.merge(&input.pull_request_id)?;

        info!(
            pull_request_id = %pr.pull_request_id,
            status = pr.status.label(),
            "pull request merged"
        );
        self.events.pull_request_merged();

        Ok(PullRequestView::from_domain(pr))
    }

    /// Replace one reviewer slot with a random pick from the outgoing
    /// reviewer's team: active members minus the outgoing reviewer and
    /// everyone already assigned.
    pub fn reassign_reviewer(
        &self,
        input: ReassignReviewerInput,
    ) -> Result<ReassignReviewerView, ReviewError> {
        require(&input.pull_request_id, "pull_request_id")?;
        require(&input.old_user_id, "old_user_id")?;

        let pr = self.lifecycle.load(&input.pull_request_id)?;
        ensure_reassignable(&pr, &input.old_user_id)?;

        let team_name = self.directory.resolve_team_of(&input.old_user_id)?;
        let members = self.directory.active_members_of(&team_name)?;
        let candidates = policy::reassignment_candidates(
            &members,
            &input.old_user_id,
            &pr.author_id,
            &pr.assigned_reviewers,
        );
        if candidates.is_empty() {
            return Err(ReviewError::NoAvailableCandidates);
        }

        let new_user_id = candidates[self.picker.pick(candidates.len())].clone();
        let updated =
            self.lifecycle
                .replace_reviewer(&input.pull_request_id, &input.old_user_id, &new_user_id)?;

        info!(
            pull_request_id = %updated.pull_request_id,
            old_user_id = %input.old_user_id,
            new_user_id = %new_user_id,
            "reviewer reassigned"
        );
        self.events.reviewer_reassigned();

        Ok(ReassignReviewerView {
            pr: PullRequestView::from_domain(updated),
            replaced_by: new_user_id,
        })
    }
}
