//! Driving port for casting votes on questions and answers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::reputation::PostKind;
use crate::domain::voting::{VoteAction, VoteState};

/// Reference to a votable post by kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostRef {
    /// Which kind of post the id names.
    pub kind: PostKind,
    /// The post's identifier.
    pub id: Uuid,
}

/// Request to apply one vote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVoteRequest {
    /// The targeted post.
    pub post: PostRef,
    /// The acting user.
    pub voter: Uuid,
    /// Requested action.
    pub action: VoteAction,
}

/// Aggregates returned after a vote was applied and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteReceipt {
    /// The post's new vote count.
    pub vote_count: i64,
    /// The acting user's resulting standing.
    pub voter_state: VoteState,
    /// The post author's new reputation total.
    pub author_reputation: i64,
}

/// Port for the vote use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCommand: Send + Sync {
    /// Apply one vote action and persist the affected records.
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteReceipt, Error>;
}

/// Fixture implementation reporting an untouched post.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteCommand;

#[async_trait]
impl VoteCommand for FixtureVoteCommand {
    async fn cast_vote(&self, _request: CastVoteRequest) -> Result<VoteReceipt, Error> {
        Ok(VoteReceipt {
            vote_count: 0,
            voter_state: VoteState::None,
            author_reputation: 0,
        })
    }
}
