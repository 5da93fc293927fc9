//! Driving port for reading questions.

use async_trait::async_trait;
use pagination::{Page, PageParams};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::answer::Answer;
use crate::domain::question::{Question, QuestionSort, QuestionStatus};
use crate::domain::user::User;
use crate::domain::voting::VoteState;

/// An answer joined with its author for read models.
#[derive(Debug, Clone)]
pub struct AnswerWithAuthor {
    /// The answer.
    pub answer: Answer,
    /// The answer's author.
    pub author: User,
    /// The viewing user's standing against the answer.
    pub viewer_vote_state: VoteState,
}

/// A question joined with its author and answers for the detail view.
#[derive(Debug, Clone)]
pub struct QuestionDetail {
    /// The question, with its view counter already bumped for this read.
    pub question: Question,
    /// The question's author.
    pub author: User,
    /// The viewing user's standing against the question.
    pub viewer_vote_state: VoteState,
    /// The question's answers: accepted first, then by votes, then oldest.
    pub answers: Vec<AnswerWithAuthor>,
}

/// A question joined with its author and answer count for list views.
#[derive(Debug, Clone)]
pub struct QuestionSummary {
    /// The question.
    pub question: Question,
    /// The question's author.
    pub author: User,
    /// Number of answers the question has.
    pub answer_count: i64,
}

/// Request for one page of the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuestionsRequest {
    /// Page window.
    pub params: PageParams,
    /// Requested ordering.
    pub sort: QuestionSort,
    /// Optional status filter.
    pub status: Option<QuestionStatus>,
}

/// Port for question read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionQuery: Send + Sync {
    /// Load a question detail view, counting the read as a view.
    async fn get_question(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<QuestionDetail, Error>;

    /// Load one page of question summaries.
    async fn list_questions(
        &self,
        request: ListQuestionsRequest,
    ) -> Result<Page<QuestionSummary>, Error>;
}

/// Fixture implementation with no questions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionQuery;

#[async_trait]
impl QuestionQuery for FixtureQuestionQuery {
    async fn get_question(
        &self,
        id: Uuid,
        _viewer: Option<Uuid>,
    ) -> Result<QuestionDetail, Error> {
        Err(Error::not_found(format!("question {id} not found")))
    }

    async fn list_questions(
        &self,
        request: ListQuestionsRequest,
    ) -> Result<Page<QuestionSummary>, Error> {
        Ok(Page::new(Vec::new(), request.params, 0))
    }
}
