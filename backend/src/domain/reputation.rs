//! Reputation point values and the floor-clamped per-user total.
//!
//! Vote-driven deltas are applied to the post author, not the voter. A
//! transition's delta is the new standing's contribution minus the old
//! standing's contribution, summed into one net delta before the single
//! clamped apply; clamping never happens between sub-steps.

use serde::{Deserialize, Serialize};

use crate::domain::voting::{VoteShift, VoteState};

/// Reputation granted to a question author per upvote.
pub const QUESTION_UPVOTE_REPUTATION: i64 = 5;
/// Reputation granted to an answer author per upvote.
pub const ANSWER_UPVOTE_REPUTATION: i64 = 10;
/// Reputation removed from a post author per downvote, either kind.
pub const DOWNVOTE_REPUTATION_PENALTY: i64 = 2;
/// Reputation granted to an answer author when their answer is accepted.
pub const ACCEPTED_ANSWER_REPUTATION: i64 = 15;

/// The two kinds of votable post; point values differ per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// A question.
    Question,
    /// An answer.
    Answer,
}

impl PostKind {
    const fn upvote_reputation(self) -> i64 {
        match self {
            Self::Question => QUESTION_UPVOTE_REPUTATION,
            Self::Answer => ANSWER_UPVOTE_REPUTATION,
        }
    }

    /// Reputation a vote standing contributes to the post author's total.
    #[must_use]
    pub const fn contribution(self, state: VoteState) -> i64 {
        match state {
            VoteState::Upvoted => self.upvote_reputation(),
            VoteState::Downvoted => -DOWNVOTE_REPUTATION_PENALTY,
            VoteState::None => 0,
        }
    }

    /// Net author-reputation change for one vote transition on this kind.
    #[must_use]
    pub const fn reputation_delta(self, shift: VoteShift) -> i64 {
        self.contribution(shift.current) - self.contribution(shift.previous)
    }
}

/// Error raised when decoding a stored reputation below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("reputation must not be negative, got {points}")]
pub struct NegativeReputation {
    /// The rejected value.
    pub points: i64,
}

/// Non-negative reputation total for a user.
///
/// Deltas are applied to the running total and clamped at zero; the total is
/// never overwritten wholesale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reputation(i64);

impl Reputation {
    /// Zero reputation for a freshly created user.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Rebuild a reputation from a stored value, rejecting negatives.
    pub const fn new(points: i64) -> Result<Self, NegativeReputation> {
        if points < 0 {
            return Err(NegativeReputation { points });
        }
        Ok(Self(points))
    }

    /// Current point total.
    #[must_use]
    pub const fn points(self) -> i64 {
        self.0
    }

    /// Apply a signed delta, clamping the result at zero.
    pub fn apply(&mut self, delta: i64) {
        let next = self.0.saturating_add(delta);
        self.0 = if next < 0 { 0 } else { next };
    }
}

impl std::fmt::Display for Reputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
