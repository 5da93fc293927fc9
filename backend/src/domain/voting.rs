//! Vote bookkeeping shared by questions and answers.
//!
//! A post tracks who upvoted and who downvoted it in two disjoint membership
//! sets; the denormalised vote count is always derived from membership
//! transitions rather than incremented ad hoc, so it stays reconstructable by
//! summing the sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vote actions a client may request against a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    /// Add an upvote, or retract one the user already holds.
    Upvote,
    /// Add a downvote, or retract one the user already holds.
    Downvote,
    /// Withdraw whatever vote the user holds, if any.
    Remove,
}

impl std::str::FromStr for VoteAction {
    type Err = InvalidVoteAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(Self::Upvote),
            "downvote" => Ok(Self::Downvote),
            "remove" => Ok(Self::Remove),
            other => Err(InvalidVoteAction {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error returned when a vote action string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vote action {value:?}; use \"upvote\", \"downvote\", or \"remove\"")]
pub struct InvalidVoteAction {
    /// The rejected input value.
    pub value: String,
}

/// A user's standing against one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    /// The user currently upvotes the post.
    Upvoted,
    /// The user currently downvotes the post.
    Downvoted,
    /// The user holds no vote on the post.
    None,
}

impl VoteState {
    /// Contribution of this state to a post's vote count.
    #[must_use]
    pub(crate) const fn count_contribution(self) -> i64 {
        match self {
            Self::Upvoted => 1,
            Self::Downvoted => -1,
            Self::None => 0,
        }
    }
}

/// One applied vote transition: the acting user's standing before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteShift {
    /// Standing before the action was applied.
    pub previous: VoteState,
    /// Standing after the action was applied.
    pub current: VoteState,
}

impl VoteShift {
    /// Change to the post's vote count implied by this transition.
    #[must_use]
    pub const fn count_delta(&self) -> i64 {
        self.current.count_contribution() - self.previous.count_contribution()
    }
}

/// Validation errors raised when rebuilding a ledger from stored membership.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteLedgerError {
    /// A user id appeared in both the upvoter and downvoter sets.
    #[error("user {user} appears in both upvoter and downvoter sets")]
    OverlappingMembership {
        /// The offending user id.
        user: Uuid,
    },
}

/// Membership bookkeeping of who upvoted or downvoted one post.
///
/// Invariant: the two sets are disjoint; a user holds at most one vote state
/// per post at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteLedger {
    upvoters: BTreeSet<Uuid>,
    downvoters: BTreeSet<Uuid>,
}

impl VoteLedger {
    /// Empty ledger for a freshly created post.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from stored membership, validating disjointness.
    pub fn from_membership(
        upvoters: Vec<Uuid>,
        downvoters: Vec<Uuid>,
    ) -> Result<Self, VoteLedgerError> {
        let upvoters: BTreeSet<Uuid> = upvoters.into_iter().collect();
        let downvoters: BTreeSet<Uuid> = downvoters.into_iter().collect();
        if let Some(user) = upvoters.intersection(&downvoters).next() {
            return Err(VoteLedgerError::OverlappingMembership { user: *user });
        }
        Ok(Self {
            upvoters,
            downvoters,
        })
    }

    /// Users currently upvoting the post.
    #[must_use]
    pub fn upvoters(&self) -> &BTreeSet<Uuid> {
        &self.upvoters
    }

    /// Users currently downvoting the post.
    #[must_use]
    pub fn downvoters(&self) -> &BTreeSet<Uuid> {
        &self.downvoters
    }

    /// Net vote count derived from membership: upvotes minus downvotes.
    ///
    /// Deriving keeps the denormalised count reconstructable from the sets
    /// instead of drifting under ad-hoc increments.
    #[must_use]
    pub fn vote_count(&self) -> i64 {
        let up = i64::try_from(self.upvoters.len()).unwrap_or(i64::MAX);
        let down = i64::try_from(self.downvoters.len()).unwrap_or(i64::MAX);
        up - down
    }

    /// The given user's current standing.
    #[must_use]
    pub fn state_of(&self, user: Uuid) -> VoteState {
        if self.upvoters.contains(&user) {
            VoteState::Upvoted
        } else if self.downvoters.contains(&user) {
            VoteState::Downvoted
        } else {
            VoteState::None
        }
    }

    /// Whether the user holds membership in either set.
    #[must_use]
    pub fn contains(&self, user: Uuid) -> bool {
        self.upvoters.contains(&user) || self.downvoters.contains(&user)
    }

    /// Apply one vote action for a user and return the resulting transition.
    ///
    /// Repeating the action the user already holds retracts it; `Remove`
    /// always clears. Membership stays disjoint because the user is removed
    /// from both sets before the new standing is recorded.
    pub fn apply(&mut self, voter: Uuid, action: VoteAction) -> VoteShift {
        let previous = self.state_of(voter);
        let current = match action {
            VoteAction::Upvote if previous == VoteState::Upvoted => VoteState::None,
            VoteAction::Upvote => VoteState::Upvoted,
            VoteAction::Downvote if previous == VoteState::Downvoted => VoteState::None,
            VoteAction::Downvote => VoteState::Downvoted,
            VoteAction::Remove => VoteState::None,
        };

        self.upvoters.remove(&voter);
        self.downvoters.remove(&voter);
        match current {
            VoteState::Upvoted => {
                self.upvoters.insert(voter);
            }
            VoteState::Downvoted => {
                self.downvoters.insert(voter);
            }
            VoteState::None => {}
        }

        VoteShift { previous, current }
    }
}

/// Error raised when a post author tries to vote on their own post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("authors cannot vote on their own posts")]
pub struct SelfVoteError;

/// Behaviour shared by posts that accept votes.
pub trait Votable {
    /// Owning user of the post; excluded from voting on it.
    fn author_id(&self) -> Uuid;

    /// The post's vote ledger.
    fn ledger(&self) -> &VoteLedger;

    /// Mutable access to the post's vote ledger.
    fn ledger_mut(&mut self) -> &mut VoteLedger;

    /// Net vote count derived from ledger membership.
    fn vote_count(&self) -> i64 {
        self.ledger().vote_count()
    }

    /// The given user's current standing against the post.
    fn vote_state_of(&self, user: Uuid) -> VoteState {
        self.ledger().state_of(user)
    }

    /// Apply one vote action, rejecting self-votes.
    fn cast_vote(&mut self, voter: Uuid, action: VoteAction) -> Result<VoteShift, SelfVoteError> {
        if voter == self.author_id() {
            return Err(SelfVoteError);
        }
        Ok(self.ledger_mut().apply(voter, action))
    }
}

#[cfg(test)]
mod tests {
    //! Transition-table coverage for the vote ledger.
    use rstest::rstest;

    use super::*;

    fn voter() -> Uuid {
        Uuid::from_u128(0xA1)
    }

    fn ledger_with(state: VoteState) -> VoteLedger {
        let mut ledger = VoteLedger::new();
        match state {
            VoteState::Upvoted => {
                ledger.apply(voter(), VoteAction::Upvote);
            }
            VoteState::Downvoted => {
                ledger.apply(voter(), VoteAction::Downvote);
            }
            VoteState::None => {}
        }
        ledger
    }

    #[rstest]
    #[case(VoteState::Upvoted, VoteAction::Upvote, VoteState::None, -1)]
    #[case(VoteState::Downvoted, VoteAction::Upvote, VoteState::Upvoted, 2)]
    #[case(VoteState::None, VoteAction::Upvote, VoteState::Upvoted, 1)]
    #[case(VoteState::Downvoted, VoteAction::Downvote, VoteState::None, 1)]
    #[case(VoteState::Upvoted, VoteAction::Downvote, VoteState::Downvoted, -2)]
    #[case(VoteState::None, VoteAction::Downvote, VoteState::Downvoted, -1)]
    #[case(VoteState::Upvoted, VoteAction::Remove, VoteState::None, -1)]
    #[case(VoteState::Downvoted, VoteAction::Remove, VoteState::None, 1)]
    #[case(VoteState::None, VoteAction::Remove, VoteState::None, 0)]
    fn transitions_follow_the_table(
        #[case] starting: VoteState,
        #[case] action: VoteAction,
        #[case] expected: VoteState,
        #[case] delta: i64,
    ) {
        let mut ledger = ledger_with(starting);

        let shift = ledger.apply(voter(), action);

        assert_eq!(shift.previous, starting);
        assert_eq!(shift.current, expected);
        assert_eq!(shift.count_delta(), delta);
        assert_eq!(ledger.state_of(voter()), expected);
    }

    #[rstest]
    #[case(VoteAction::Upvote)]
    #[case(VoteAction::Downvote)]
    fn sets_stay_disjoint_across_flips(#[case] first: VoteAction) {
        let mut ledger = VoteLedger::new();
        ledger.apply(voter(), first);
        ledger.apply(voter(), VoteAction::Upvote);
        ledger.apply(voter(), VoteAction::Downvote);

        let overlap: Vec<_> = ledger
            .upvoters()
            .intersection(ledger.downvoters())
            .collect();
        assert!(overlap.is_empty());
    }

    #[test]
    fn upvote_then_remove_restores_initial_state() {
        let mut ledger = VoteLedger::new();
        let up = ledger.apply(voter(), VoteAction::Upvote);
        let removed = ledger.apply(voter(), VoteAction::Remove);

        assert_eq!(up.count_delta() + removed.count_delta(), 0);
        assert!(!ledger.contains(voter()));
    }

    #[test]
    fn repeated_upvote_toggles_off() {
        let mut toggled = VoteLedger::new();
        toggled.apply(voter(), VoteAction::Upvote);
        let second = toggled.apply(voter(), VoteAction::Upvote);

        assert_eq!(second.current, VoteState::None);
        assert_eq!(second.count_delta(), -1);
        assert!(!toggled.contains(voter()));
    }

    #[test]
    fn from_membership_rejects_overlap() {
        let user = voter();
        let error = VoteLedger::from_membership(vec![user], vec![user]).expect_err("overlap");
        assert_eq!(error, VoteLedgerError::OverlappingMembership { user });
    }

    #[test]
    fn from_membership_round_trips_disjoint_sets() {
        let up = Uuid::from_u128(1);
        let down = Uuid::from_u128(2);
        let ledger = VoteLedger::from_membership(vec![up], vec![down]).expect("disjoint");
        assert_eq!(ledger.state_of(up), VoteState::Upvoted);
        assert_eq!(ledger.state_of(down), VoteState::Downvoted);
    }

    #[rstest]
    #[case("upvote", VoteAction::Upvote)]
    #[case("downvote", VoteAction::Downvote)]
    #[case("remove", VoteAction::Remove)]
    fn vote_action_parses_wire_values(#[case] raw: &str, #[case] expected: VoteAction) {
        assert_eq!(raw.parse::<VoteAction>().expect("parses"), expected);
    }

    #[test]
    fn vote_action_rejects_unknown_values() {
        let error = "sideways".parse::<VoteAction>().expect_err("rejected");
        assert!(error.to_string().contains("sideways"));
    }
}
