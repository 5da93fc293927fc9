//! Answer aggregate: votable post belonging to one question.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::voting::{Votable, VoteLedger, VoteLedgerError};

/// Minimum allowed length for an answer body.
pub const ANSWER_BODY_MIN: usize = 20;
/// Maximum allowed length for an answer body.
pub const ANSWER_BODY_MAX: usize = 10_000;

/// Validation errors returned by the answer constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerValidationError {
    /// The body was outside the accepted length range.
    #[error("body must be between {ANSWER_BODY_MIN} and {ANSWER_BODY_MAX} characters")]
    BodyLength,
    /// Stored vote membership overlapped.
    #[error(transparent)]
    Ledger(#[from] VoteLedgerError),
    /// The author appeared in a vote set of their own answer.
    #[error("answer authors cannot appear in their own vote sets")]
    AuthorInVoteSets,
}

/// Validated answer body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBody(String);

impl AnswerBody {
    /// Validate and construct an [`AnswerBody`].
    pub fn new(body: impl Into<String>) -> Result<Self, AnswerValidationError> {
        let body = body.into();
        let length = body.chars().count();
        if !(ANSWER_BODY_MIN..=ANSWER_BODY_MAX).contains(&length) {
            return Err(AnswerValidationError::BodyLength);
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for AnswerBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Unvalidated field bundle for rebuilding a stored answer.
#[derive(Debug, Clone)]
pub struct AnswerDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning question.
    pub question_id: Uuid,
    /// Owning user.
    pub author_id: Uuid,
    /// Validated body.
    pub body: AnswerBody,
    /// Whether the question author accepted this answer.
    pub is_accepted: bool,
    /// Vote membership.
    pub ledger: VoteLedger,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// An answer posted against a question.
///
/// ## Invariants
/// - The author never appears in the vote sets.
/// - At most one answer per question has `is_accepted == true`, and its id
///   matches the question's accepted-answer reference; the acceptance
///   use-case maintains the cross-aggregate half of this invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id: Uuid,
    question_id: Uuid,
    author_id: Uuid,
    body: AnswerBody,
    is_accepted: bool,
    ledger: VoteLedger,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Answer {
    /// Rebuild an answer from stored fields, enforcing the invariants.
    pub fn new(draft: AnswerDraft) -> Result<Self, AnswerValidationError> {
        let AnswerDraft {
            id,
            question_id,
            author_id,
            body,
            is_accepted,
            ledger,
            created_at,
            updated_at,
        } = draft;
        if ledger.contains(author_id) {
            return Err(AnswerValidationError::AuthorInVoteSets);
        }
        Ok(Self {
            id,
            question_id,
            author_id,
            body,
            is_accepted,
            ledger,
            created_at,
            updated_at,
        })
    }

    /// Create a brand-new, not-yet-accepted answer.
    #[must_use]
    pub fn post(question_id: Uuid, author_id: Uuid, body: AnswerBody, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id,
            author_id,
            body,
            is_accepted: false,
            ledger: VoteLedger::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning question.
    #[must_use]
    pub fn question_id(&self) -> Uuid {
        self.question_id
    }

    /// Owning user.
    #[must_use]
    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    /// Answer body.
    #[must_use]
    pub fn body(&self) -> &AnswerBody {
        &self.body
    }

    /// Whether the question author accepted this answer.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.is_accepted
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mark this answer as the accepted one.
    pub fn mark_accepted(&mut self) {
        self.is_accepted = true;
    }

    /// Withdraw acceptance from this answer.
    pub fn mark_not_accepted(&mut self) {
        self.is_accepted = false;
    }
}

impl Votable for Answer {
    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut VoteLedger {
        &mut self.ledger
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::voting::{SelfVoteError, VoteAction};

    fn body() -> AnswerBody {
        AnswerBody::new("Use a scope to end the first borrow.").expect("valid body")
    }

    fn answer() -> Answer {
        Answer::post(Uuid::new_v4(), Uuid::from_u128(0xC3), body(), Utc::now())
    }

    #[test]
    fn body_rejects_short_input() {
        let error = AnswerBody::new("nope").expect_err("short body");
        assert_eq!(error, AnswerValidationError::BodyLength);
    }

    #[test]
    fn post_starts_unaccepted_with_no_votes() {
        let answer = answer();
        assert!(!answer.is_accepted());
        assert_eq!(answer.vote_count(), 0);
    }

    #[test]
    fn author_cannot_vote_on_own_answer() {
        let mut answer = answer();
        let author = answer.author_id();
        let error = answer
            .cast_vote(author, VoteAction::Downvote)
            .expect_err("self vote");
        assert_eq!(error, SelfVoteError);
        assert_eq!(answer.vote_count(), 0);
    }

    #[test]
    fn acceptance_flag_toggles() {
        let mut answer = answer();
        answer.mark_accepted();
        assert!(answer.is_accepted());
        answer.mark_not_accepted();
        assert!(!answer.is_accepted());
    }

    #[test]
    fn new_rejects_author_membership_in_vote_sets() {
        let author = Uuid::from_u128(0xC3);
        let ledger =
            VoteLedger::from_membership(Vec::new(), vec![author]).expect("disjoint sets");
        let draft = AnswerDraft {
            id: Uuid::new_v4(),
            question_id: Uuid::new_v4(),
            author_id: author,
            body: body(),
            is_accepted: false,
            ledger,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let error = Answer::new(draft).expect_err("author in vote set");
        assert_eq!(error, AnswerValidationError::AuthorInVoteSets);
    }
}
