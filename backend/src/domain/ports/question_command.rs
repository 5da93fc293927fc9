//! Driving port for posting questions.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::question::{Question, QuestionBody, QuestionTitle};

/// Request to post a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuestionRequest {
    /// The acting (authoring) user.
    pub author_id: Uuid,
    /// Raw title input; validated by the use-case.
    pub title: String,
    /// Raw body input; validated by the use-case.
    pub body: String,
}

/// Port for the question creation use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionCommand: Send + Sync {
    /// Validate and persist a new question.
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error>;
}

/// Fixture implementation that validates but does not persist.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionCommand;

#[async_trait]
impl QuestionCommand for FixtureQuestionCommand {
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error> {
        let title =
            QuestionTitle::new(request.title).map_err(|err| Error::invalid_request(err.to_string()))?;
        let body =
            QuestionBody::new(request.body).map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Question::ask(request.author_id, title, body, Utc::now()))
    }
}
