//! Question use-cases: posting, detail reads, and list pages.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::Page;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::persistence_errors::{
    map_answer_persistence_error, map_question_persistence_error, map_user_persistence_error,
};
use crate::domain::ports::{
    AnswerRepository, AnswerWithAuthor, CreateQuestionRequest, ListQuestionsRequest,
    QuestionCommand, QuestionDetail, QuestionListQuery, QuestionQuery, QuestionRepository,
    QuestionSummary, UserRepository,
};
use crate::domain::question::{Question, QuestionBody, QuestionTitle};
use crate::domain::user::User;
use crate::domain::voting::{Votable, VoteState};

/// Question service implementing the question driving ports.
#[derive(Clone)]
pub struct QuestionService<Q, A, U> {
    questions: Arc<Q>,
    answers: Arc<A>,
    users: Arc<U>,
}

impl<Q, A, U> QuestionService<Q, A, U> {
    /// Create a new service over the three repositories.
    pub fn new(questions: Arc<Q>, answers: Arc<A>, users: Arc<U>) -> Self {
        Self {
            questions,
            answers,
            users,
        }
    }
}

impl<Q, A, U> QuestionService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn load_authors(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, User>, Error> {
        let users = self
            .users
            .find_by_ids(ids)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(users.into_iter().map(|user| (user.id(), user)).collect())
    }
}

#[async_trait]
impl<Q, A, U> QuestionCommand for QuestionService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error> {
        let author = self
            .users
            .find_by_id(request.author_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if author.is_banned() {
            return Err(Error::forbidden(
                "your account is banned and cannot post questions",
            ));
        }

        let title = QuestionTitle::new(request.title).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "title" }))
        })?;
        let body = QuestionBody::new(request.body).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "body" }))
        })?;

        let question = Question::ask(author.id(), title, body, Utc::now());
        self.questions
            .save(&question)
            .await
            .map_err(map_question_persistence_error)?;

        debug!(question = %question.id(), author = %author.id(), "question posted");
        Ok(question)
    }
}

#[async_trait]
impl<Q, A, U> QuestionQuery for QuestionService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn get_question(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<QuestionDetail, Error> {
        self.questions
            .record_view(id)
            .await
            .map_err(map_question_persistence_error)?;

        let question = self
            .questions
            .find_by_id(id)
            .await
            .map_err(map_question_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("question {id} not found")))?;

        let author = self
            .users
            .find_by_id(question.author_id())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("question author not found"))?;

        let answers = self
            .answers
            .list_for_question(id)
            .await
            .map_err(map_answer_persistence_error)?;
        let authors = self
            .load_authors(answers.iter().map(Votable::author_id).collect())
            .await?;

        // Answers whose authors were deleted are dropped from the view.
        let answers = answers
            .into_iter()
            .filter_map(|answer| {
                let author = authors.get(&answer.author_id()).cloned()?;
                let viewer_vote_state =
                    viewer.map_or(VoteState::None, |viewer| answer.vote_state_of(viewer));
                Some(AnswerWithAuthor {
                    answer,
                    author,
                    viewer_vote_state,
                })
            })
            .collect();

        let viewer_vote_state =
            viewer.map_or(VoteState::None, |viewer| question.vote_state_of(viewer));

        Ok(QuestionDetail {
            question,
            author,
            viewer_vote_state,
            answers,
        })
    }

    async fn list_questions(
        &self,
        request: ListQuestionsRequest,
    ) -> Result<Page<QuestionSummary>, Error> {
        let page = self
            .questions
            .list(QuestionListQuery {
                params: request.params,
                sort: request.sort,
                status: request.status,
            })
            .await
            .map_err(map_question_persistence_error)?;

        let question_ids: Vec<Uuid> = page.questions.iter().map(Question::id).collect();
        let answer_counts: HashMap<Uuid, i64> = self
            .answers
            .count_for_questions(question_ids)
            .await
            .map_err(map_answer_persistence_error)?
            .into_iter()
            .collect();
        let authors = self
            .load_authors(page.questions.iter().map(Votable::author_id).collect())
            .await?;

        // Questions whose authors were deleted are dropped from the page.
        let summaries = page
            .questions
            .into_iter()
            .filter_map(|question| {
                let author = authors.get(&question.author_id()).cloned()?;
                let answer_count = answer_counts.get(&question.id()).copied().unwrap_or(0);
                Some(QuestionSummary {
                    question,
                    author,
                    answer_count,
                })
            })
            .collect();

        Ok(Page::new(summaries, request.params, page.total))
    }
}

#[cfg(test)]
#[path = "question_service_tests.rs"]
mod tests;
