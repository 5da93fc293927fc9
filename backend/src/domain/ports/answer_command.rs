//! Driving port for posting answers.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::answer::{Answer, AnswerBody};

/// Request to post a new answer against a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnswerRequest {
    /// The question being answered.
    pub question_id: Uuid,
    /// The acting (authoring) user.
    pub author_id: Uuid,
    /// Raw body input; validated by the use-case.
    pub body: String,
}

/// Port for the answer creation use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerCommand: Send + Sync {
    /// Validate and persist a new answer.
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error>;
}

/// Fixture implementation that validates but does not persist.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnswerCommand;

#[async_trait]
impl AnswerCommand for FixtureAnswerCommand {
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error> {
        let body =
            AnswerBody::new(request.body).map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Answer::post(
            request.question_id,
            request.author_id,
            body,
            Utc::now(),
        ))
    }
}
