//! Driving port for toggling answer acceptance.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::question::QuestionStatus;

/// Request to toggle acceptance of one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAcceptRequest {
    /// The answer whose acceptance is toggled.
    pub answer_id: Uuid,
    /// The acting user; must be the question's author.
    pub acting_user: Uuid,
}

/// Aggregates returned after an acceptance toggle was persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceReceipt {
    /// Whether the answer ended up accepted.
    pub answer_accepted: bool,
    /// The question's resulting status.
    pub question_status: QuestionStatus,
    /// The question's accepted answer after the toggle, if any.
    pub accepted_answer_id: Option<Uuid>,
    /// The answer author's new reputation total.
    pub answer_author_reputation: i64,
}

/// Port for the acceptance use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AcceptanceCommand: Send + Sync {
    /// Toggle acceptance of the answer and persist the affected records.
    async fn toggle_accept(&self, request: ToggleAcceptRequest)
    -> Result<AcceptanceReceipt, Error>;
}

/// Fixture implementation reporting an open question.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAcceptanceCommand;

#[async_trait]
impl AcceptanceCommand for FixtureAcceptanceCommand {
    async fn toggle_accept(
        &self,
        _request: ToggleAcceptRequest,
    ) -> Result<AcceptanceReceipt, Error> {
        Ok(AcceptanceReceipt {
            answer_accepted: false,
            question_status: QuestionStatus::Open,
            accepted_answer_id: None,
            answer_author_reputation: 0,
        })
    }
}
