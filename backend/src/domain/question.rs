//! Question aggregate: votable post with an optional accepted answer.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::voting::{Votable, VoteLedger, VoteLedgerError};

/// Minimum allowed length for a question title.
pub const TITLE_MIN: usize = 10;
/// Maximum allowed length for a question title.
pub const TITLE_MAX: usize = 200;
/// Minimum allowed length for a question body.
pub const BODY_MIN: usize = 30;
/// Maximum allowed length for a question body.
pub const BODY_MAX: usize = 10_000;

/// Validation errors returned by the question constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    /// The title was empty once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// The title was outside the accepted length range.
    #[error("title must be between {TITLE_MIN} and {TITLE_MAX} characters")]
    TitleLength,
    /// The body was outside the accepted length range.
    #[error("body must be between {BODY_MIN} and {BODY_MAX} characters")]
    BodyLength,
    /// Stored vote membership overlapped.
    #[error(transparent)]
    Ledger(#[from] VoteLedgerError),
    /// The author appeared in a vote set of their own question.
    #[error("question authors cannot appear in their own vote sets")]
    AuthorInVoteSets,
    /// Stored status disagreed with the accepted-answer reference.
    #[error("status must be solved exactly when an accepted answer is set")]
    StatusAcceptanceMismatch,
}

/// Validated question title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTitle(String);

impl QuestionTitle {
    /// Validate and construct a [`QuestionTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuestionValidationError::EmptyTitle);
        }
        let length = title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&length) {
            return Err(QuestionValidationError::TitleLength);
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for QuestionTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for QuestionTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validated question body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBody(String);

impl QuestionBody {
    /// Validate and construct a [`QuestionBody`].
    pub fn new(body: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let body = body.into();
        let length = body.chars().count();
        if !(BODY_MIN..=BODY_MAX).contains(&length) {
            return Err(QuestionValidationError::BodyLength);
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for QuestionBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Lifecycle status of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    /// No accepted answer yet.
    Open,
    /// The author accepted an answer.
    Solved,
    /// Terminal state set outside this service; no new answers accepted.
    Closed,
}

impl QuestionStatus {
    /// Stable storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Solved => "solved",
            Self::Closed => "closed",
        }
    }
}

impl std::str::FromStr for QuestionStatus {
    type Err = InvalidQuestionStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "solved" => Ok(Self::Solved),
            "closed" => Ok(Self::Closed),
            other => Err(InvalidQuestionStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error returned when a question status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid question status {value:?}; use \"open\", \"solved\", or \"closed\"")]
pub struct InvalidQuestionStatus {
    /// The rejected input value.
    pub value: String,
}

/// Sort orders accepted by the question list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionSort {
    /// Most recently created first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Highest vote count first, ties broken by views.
    Popular,
    /// Most viewed first.
    Views,
    /// Most recently updated first.
    Active,
    /// Only questions without answers, newest first.
    Unanswered,
}

impl std::str::FromStr for QuestionSort {
    type Err = InvalidQuestionSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "popular" => Ok(Self::Popular),
            "views" => Ok(Self::Views),
            "active" => Ok(Self::Active),
            "unanswered" => Ok(Self::Unanswered),
            other => Err(InvalidQuestionSort {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error returned when a question sort string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid sort {value:?}; use \"newest\", \"oldest\", \"popular\", \"views\", \"active\", or \"unanswered\""
)]
pub struct InvalidQuestionSort {
    /// The rejected input value.
    pub value: String,
}

/// Unvalidated field bundle for rebuilding a stored question.
#[derive(Debug, Clone)]
pub struct QuestionDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user.
    pub author_id: Uuid,
    /// Validated title.
    pub title: QuestionTitle,
    /// Validated body.
    pub body: QuestionBody,
    /// Lifecycle status.
    pub status: QuestionStatus,
    /// Currently accepted answer, if any.
    pub accepted_answer_id: Option<Uuid>,
    /// Vote membership.
    pub ledger: VoteLedger,
    /// View counter.
    pub views: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A question posted to the community.
///
/// ## Invariants
/// - The author never appears in the vote sets.
/// - `status == Solved` exactly when `accepted_answer_id` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: Uuid,
    author_id: Uuid,
    title: QuestionTitle,
    body: QuestionBody,
    status: QuestionStatus,
    accepted_answer_id: Option<Uuid>,
    ledger: VoteLedger,
    views: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Question {
    /// Rebuild a question from stored fields, enforcing the invariants.
    pub fn new(draft: QuestionDraft) -> Result<Self, QuestionValidationError> {
        let QuestionDraft {
            id,
            author_id,
            title,
            body,
            status,
            accepted_answer_id,
            ledger,
            views,
            created_at,
            updated_at,
        } = draft;
        if ledger.contains(author_id) {
            return Err(QuestionValidationError::AuthorInVoteSets);
        }
        if (status == QuestionStatus::Solved) != accepted_answer_id.is_some() {
            return Err(QuestionValidationError::StatusAcceptanceMismatch);
        }
        Ok(Self {
            id,
            author_id,
            title,
            body,
            status,
            accepted_answer_id,
            ledger,
            views,
            created_at,
            updated_at,
        })
    }

    /// Create a brand-new open question.
    #[must_use]
    pub fn ask(
        author_id: Uuid,
        title: QuestionTitle,
        body: QuestionBody,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            body,
            status: QuestionStatus::Open,
            accepted_answer_id: None,
            ledger: VoteLedger::new(),
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn author_id(&self) -> Uuid {
        self.author_id
    }

    /// Question title.
    #[must_use]
    pub fn title(&self) -> &QuestionTitle {
        &self.title
    }

    /// Question body.
    #[must_use]
    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    /// Currently accepted answer, if any.
    #[must_use]
    pub fn accepted_answer_id(&self) -> Option<Uuid> {
        self.accepted_answer_id
    }

    /// View counter.
    #[must_use]
    pub fn views(&self) -> i64 {
        self.views
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

    /// Count one detail read.
    pub fn record_view(&mut self) {
        self.views += 1;
    }

    /// Record an answer as accepted and mark the question solved.
    pub fn accept_answer(&mut self, answer_id: Uuid) {
        self.accepted_answer_id = Some(answer_id);
        self.status = QuestionStatus::Solved;
    }

    /// Clear the accepted answer and reopen the question.
    pub fn clear_accepted_answer(&mut self) {
        self.accepted_answer_id = None;
        self.status = QuestionStatus::Open;
    }
}

impl Votable for Question {
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
