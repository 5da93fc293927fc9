//! Answer use-case: posting an answer against a question.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::domain::answer::{Answer, AnswerBody};
use crate::domain::persistence_errors::{
    map_answer_persistence_error, map_question_persistence_error, map_user_persistence_error,
};
use crate::domain::ports::{
    AnswerCommand, AnswerRepository, CreateAnswerRequest, QuestionRepository, UserRepository,
};
use crate::domain::question::QuestionStatus;

/// Answer service implementing the answer driving port.
#[derive(Clone)]
pub struct AnswerService<Q, A, U> {
    questions: Arc<Q>,
    answers: Arc<A>,
    users: Arc<U>,
}

impl<Q, A, U> AnswerService<Q, A, U> {
    /// Create a new service over the three repositories.
    pub fn new(questions: Arc<Q>, answers: Arc<A>, users: Arc<U>) -> Self {
        Self {
            questions,
            answers,
            users,
        }
    }
}

#[async_trait]
impl<Q, A, U> AnswerCommand for AnswerService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error> {
        let author = self
            .users
            .find_by_id(request.author_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if author.is_banned() {
            return Err(Error::forbidden(
                "your account is banned and cannot post answers",
            ));
        }

        let question = self
            .questions
            .find_by_id(request.question_id)
            .await
            .map_err(map_question_persistence_error)?
            .ok_or_else(|| {
                Error::not_found(format!("question {} not found", request.question_id))
            })?;
        if question.status() == QuestionStatus::Closed {
            return Err(Error::invalid_request("cannot answer a closed question"));
        }

        let body = AnswerBody::new(request.body).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "body" }))
        })?;

        let answer = Answer::post(question.id(), author.id(), body, Utc::now());
        self.answers
            .save(&answer)
            .await
            .map_err(map_answer_persistence_error)?;

        // Re-saving the question refreshes its activity timestamp so the
        // "active" sort surfaces freshly answered questions.
        self.questions
            .save(&question)
            .await
            .map_err(map_question_persistence_error)?;

        debug!(answer = %answer.id(), question = %question.id(), "answer posted");
        Ok(answer)
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
