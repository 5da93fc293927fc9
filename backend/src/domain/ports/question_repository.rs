//! Port for question persistence adapters and their errors.

use async_trait::async_trait;
use pagination::PageParams;
use uuid::Uuid;

use crate::domain::question::{Question, QuestionSort, QuestionStatus};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by question repository adapters.
    pub enum QuestionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "question repository query failed: {message}",
    }
}

/// Filters and ordering for one page of the question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionListQuery {
    /// Page window.
    pub params: PageParams,
    /// Requested ordering.
    pub sort: QuestionSort,
    /// Optional status filter.
    pub status: Option<QuestionStatus>,
}

/// One page of questions plus the total match count.
#[derive(Debug, Clone)]
pub struct QuestionPage {
    /// Questions on this page, in query order.
    pub questions: Vec<Question>,
    /// Total number of matches across all pages.
    pub total: u64,
}

/// Port for reading and writing questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert or update a question record.
    async fn save(&self, question: &Question) -> Result<(), QuestionPersistenceError>;

    /// Fetch a question by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, QuestionPersistenceError>;

    /// Bump the view counter for a question; unknown ids are a no-op.
    async fn record_view(&self, id: Uuid) -> Result<(), QuestionPersistenceError>;

    /// Load one page of questions matching the query.
    async fn list(&self, query: QuestionListQuery)
    -> Result<QuestionPage, QuestionPersistenceError>;
}

/// Fixture implementation for wiring without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionRepository;

#[async_trait]
impl QuestionRepository for FixtureQuestionRepository {
    async fn save(&self, _question: &Question) -> Result<(), QuestionPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Question>, QuestionPersistenceError> {
        Ok(None)
    }

    async fn record_view(&self, _id: Uuid) -> Result<(), QuestionPersistenceError> {
        Ok(())
    }

    async fn list(
        &self,
        _query: QuestionListQuery,
    ) -> Result<QuestionPage, QuestionPersistenceError> {
        Ok(QuestionPage {
            questions: Vec::new(),
            total: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_find_returns_none() {
        let repo = FixtureQuestionRepository;
        let found = repo.find_by_id(Uuid::new_v4()).await.expect("fixture ok");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_list_returns_empty_page() {
        let repo = FixtureQuestionRepository;
        let page = repo
            .list(QuestionListQuery {
                params: PageParams::default(),
                sort: QuestionSort::Newest,
                status: None,
            })
            .await
            .expect("fixture ok");
        assert!(page.questions.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn query_error_formats_message() {
        let err = QuestionPersistenceError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
