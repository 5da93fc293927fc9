//! Vote use-case: apply one vote action and the matching reputation change.
//!
//! Each request is a request-scoped read-modify-write: load the post and its
//! author, apply the ledger transition and the net reputation delta, then
//! persist the author record followed by the post. The two writes are
//! intentionally separate single-record writes; see DESIGN.md for the
//! atomicity decision.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Error;
use crate::domain::persistence_errors::{
    map_answer_persistence_error, map_question_persistence_error, map_user_persistence_error,
};
use crate::domain::ports::{
    AnswerRepository, CastVoteRequest, QuestionRepository, UserRepository, VoteCommand,
    VoteReceipt,
};
use crate::domain::reputation::PostKind;
use crate::domain::user::User;
use crate::domain::voting::{Votable, VoteShift};

/// Vote service implementing the vote driving port.
#[derive(Clone)]
pub struct VoteService<Q, A, U> {
    questions: Arc<Q>,
    answers: Arc<A>,
    users: Arc<U>,
}

impl<Q, A, U> VoteService<Q, A, U> {
    /// Create a new service over the three repositories.
    pub fn new(questions: Arc<Q>, answers: Arc<A>, users: Arc<U>) -> Self {
        Self {
            questions,
            answers,
            users,
        }
    }
}

const fn self_vote_message(kind: PostKind) -> &'static str {
    match kind {
        PostKind::Question => "you cannot vote on your own question",
        PostKind::Answer => "you cannot vote on your own answer",
    }
}

const fn author_missing_message(kind: PostKind) -> &'static str {
    match kind {
        PostKind::Question => "question author not found",
        PostKind::Answer => "answer author not found",
    }
}

impl<Q, A, U> VoteService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    /// Apply the ledger transition to the post and the net reputation delta
    /// to its author, persisting the author record.
    async fn settle_author(
        &self,
        post: &mut (impl Votable + Send),
        kind: PostKind,
        request: CastVoteRequest,
    ) -> Result<(VoteShift, User), Error> {
        let shift = post
            .cast_vote(request.voter, request.action)
            .map_err(|_| Error::forbidden(self_vote_message(kind)))?;

        let delta = kind.reputation_delta(shift);
        let mut author = self
            .users
            .find_by_id(post.author_id())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(author_missing_message(kind)))?;
        author.apply_reputation_delta(delta);

        self.users
            .upsert(&author)
            .await
            .map_err(map_user_persistence_error)?;

        debug!(
            voter = %request.voter,
            post = %request.post.id,
            delta,
            "vote transition applied"
        );
        Ok((shift, author))
    }

    async fn vote_on_question(&self, request: CastVoteRequest) -> Result<VoteReceipt, Error> {
        let mut question = self
            .questions
            .find_by_id(request.post.id)
            .await
            .map_err(map_question_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("question {} not found", request.post.id)))?;

        let (shift, author) = self
            .settle_author(&mut question, PostKind::Question, request)
            .await?;

        self.questions
            .save(&question)
            .await
            .map_err(map_question_persistence_error)?;

        Ok(VoteReceipt {
            vote_count: question.vote_count(),
            voter_state: shift.current,
            author_reputation: author.reputation().points(),
        })
    }

    async fn vote_on_answer(&self, request: CastVoteRequest) -> Result<VoteReceipt, Error> {
        let mut answer = self
            .answers
            .find_by_id(request.post.id)
            .await
            .map_err(map_answer_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("answer {} not found", request.post.id)))?;

        let (shift, author) = self
            .settle_author(&mut answer, PostKind::Answer, request)
            .await?;

        self.answers
            .save(&answer)
            .await
            .map_err(map_answer_persistence_error)?;

        Ok(VoteReceipt {
            vote_count: answer.vote_count(),
            voter_state: shift.current,
            author_reputation: author.reputation().points(),
        })
    }
}

#[async_trait]
impl<Q, A, U> VoteCommand for VoteService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteReceipt, Error> {
        match request.post.kind {
            PostKind::Question => self.vote_on_question(request).await,
            PostKind::Answer => self.vote_on_answer(request).await,
        }
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
