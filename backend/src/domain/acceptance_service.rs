//! Acceptance use-case: toggle an answer's accepted state.
//!
//! Accepting over a previously accepted answer first withdraws that answer's
//! acceptance and its author's reputation grant, then applies the new grant;
//! the two user updates are independent, not a transfer. Writes follow the
//! same ordering as the vote use-case: user records before posts, the
//! question last.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::acceptance::{AcceptanceTransition, decide};
use crate::domain::persistence_errors::{
    map_answer_persistence_error, map_question_persistence_error, map_user_persistence_error,
};
use crate::domain::ports::{
    AcceptanceCommand, AcceptanceReceipt, AnswerRepository, QuestionRepository,
    ToggleAcceptRequest, UserRepository,
};
use crate::domain::reputation::ACCEPTED_ANSWER_REPUTATION;

/// Acceptance service implementing the acceptance driving port.
#[derive(Clone)]
pub struct AcceptanceService<Q, A, U> {
    questions: Arc<Q>,
    answers: Arc<A>,
    users: Arc<U>,
}

impl<Q, A, U> AcceptanceService<Q, A, U> {
    /// Create a new service over the three repositories.
    pub fn new(questions: Arc<Q>, answers: Arc<A>, users: Arc<U>) -> Self {
        Self {
            questions,
            answers,
            users,
        }
    }
}

impl<Q, A, U> AcceptanceService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    /// Withdraw acceptance from a previously accepted answer and revoke its
    /// author's grant. A dangling reference is tolerated as a no-op.
    async fn displace_previous(&self, previous_id: Uuid) -> Result<(), Error> {
        let Some(mut previous) = self
            .answers
            .find_by_id(previous_id)
            .await
            .map_err(map_answer_persistence_error)?
        else {
            return Ok(());
        };

        previous.mark_not_accepted();
        self.answers
            .save(&previous)
            .await
            .map_err(map_answer_persistence_error)?;

        if let Some(mut previous_author) = self
            .users
            .find_by_id(previous.author_id())
            .await
            .map_err(map_user_persistence_error)?
        {
            previous_author.apply_reputation_delta(-ACCEPTED_ANSWER_REPUTATION);
            self.users
                .upsert(&previous_author)
                .await
                .map_err(map_user_persistence_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl<Q, A, U> AcceptanceCommand for AcceptanceService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn toggle_accept(
        &self,
        request: ToggleAcceptRequest,
    ) -> Result<AcceptanceReceipt, Error> {
        let mut answer = self
            .answers
            .find_by_id(request.answer_id)
            .await
            .map_err(map_answer_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("answer {} not found", request.answer_id)))?;

        let mut question = self
            .questions
            .find_by_id(answer.question_id())
            .await
            .map_err(map_question_persistence_error)?
            .ok_or_else(|| {
                Error::not_found(format!("question {} not found", answer.question_id()))
            })?;

        if request.acting_user != question.author_id() {
            return Err(Error::forbidden(
                "only the question author can accept answers",
            ));
        }

        let mut answer_author = self
            .users
            .find_by_id(answer.author_id())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("answer author not found"))?;

        let transition =
            decide(&question, &answer).map_err(|err| Error::invalid_request(err.to_string()))?;
        match transition {
            AcceptanceTransition::Unaccept => {
                answer.mark_not_accepted();
                question.clear_accepted_answer();
                answer_author.apply_reputation_delta(-ACCEPTED_ANSWER_REPUTATION);
            }
            AcceptanceTransition::Accept { displaced } => {
                if let Some(previous_id) = displaced {
                    self.displace_previous(previous_id).await?;
                }
                answer.mark_accepted();
                question.accept_answer(answer.id());
                answer_author.apply_reputation_delta(ACCEPTED_ANSWER_REPUTATION);
            }
        }

        self.users
            .upsert(&answer_author)
            .await
            .map_err(map_user_persistence_error)?;
        self.answers
            .save(&answer)
            .await
            .map_err(map_answer_persistence_error)?;
        self.questions
            .save(&question)
            .await
            .map_err(map_question_persistence_error)?;

        debug!(
            question = %question.id(),
            answer = %answer.id(),
            accepted = answer.is_accepted(),
            "acceptance toggled"
        );

        Ok(AcceptanceReceipt {
            answer_accepted: answer.is_accepted(),
            question_status: question.status(),
            accepted_answer_id: question.accepted_answer_id(),
            answer_author_reputation: answer_author.reputation().points(),
        })
    }
}

#[cfg(test)]
#[path = "acceptance_service_tests.rs"]
mod tests;
