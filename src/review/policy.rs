use rand::Rng;

use super::domain::{User, MAX_REVIEWER_SLOTS};

/// Randomness seam for the reassignment pick so tests can substitute a
/// deterministic source.
pub trait ReviewerPicker: Send + Sync {
    /// Index into a candidate list of length `len` (`len >= 1`).
    fn pick(&self, len: usize) -> usize;
}

/// Production picker: uniform over the candidate list.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngPicker;

impl ReviewerPicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Initial assignment: drop the author, then fill up to two slots in the
/// order the directory returned (display-name order). Fewer than two
/// eligible members means fewer reviewers, not an error.
pub fn initial_reviewers(members: &[User], author_id: &str) -> Vec<String> {
    members
        .iter()
        .filter(|user| user.user_id != author_id)
        .take(MAX_REVIEWER_SLOTS)
        .map(|user| user.user_id.clone())
        .collect()
}

/// Reassignment candidates: active team members minus the reviewer being
/// replaced, everyone already occupying a slot, and the author. The author
/// exclusion keeps the no-self-review invariant across swaps even when the
/// author sits on the reviewing team.
pub fn reassignment_candidates(
    members: &[User],
    old_user_id: &str,
    author_id: &str,
    assigned: &[String],
) -> Vec<String> {
    members
        .iter()
        .filter(|user| user.user_id != old_user_id && user.user_id != author_id)
        .filter(|user| !assigned.iter().any(|r| *r == user.user_id))
        .map(|user| user.user_id.clone())
        .collect()
}
