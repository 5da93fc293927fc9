//! Port for answer persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::answer::Answer;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by answer repository adapters.
    pub enum AnswerPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "answer repository query failed: {message}",
    }
}

/// Port for reading and writing answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Insert or update an answer record.
    async fn save(&self, answer: &Answer) -> Result<(), AnswerPersistenceError>;

    /// Fetch an answer by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Answer>, AnswerPersistenceError>;

    /// Load a question's answers: accepted first, then by votes, then oldest.
    async fn list_for_question(
        &self,
        question_id: Uuid,
    ) -> Result<Vec<Answer>, AnswerPersistenceError>;

    /// Count answers per question for the given question ids.
    ///
    /// Questions without answers are absent from the result.
    async fn count_for_questions(
        &self,
        question_ids: Vec<Uuid>,
    ) -> Result<Vec<(Uuid, i64)>, AnswerPersistenceError>;
}

/// Fixture implementation for wiring without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnswerRepository;

#[async_trait]
impl AnswerRepository for FixtureAnswerRepository {
    async fn save(&self, _answer: &Answer) -> Result<(), AnswerPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Answer>, AnswerPersistenceError> {
        Ok(None)
    }

    async fn list_for_question(
        &self,
        _question_id: Uuid,
    ) -> Result<Vec<Answer>, AnswerPersistenceError> {
        Ok(Vec::new())
    }

    async fn count_for_questions(
        &self,
        _question_ids: Vec<Uuid>,
    ) -> Result<Vec<(Uuid, i64)>, AnswerPersistenceError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_list_returns_empty() {
        let repo = FixtureAnswerRepository;
        let answers = repo
            .list_for_question(Uuid::new_v4())
            .await
            .expect("fixture ok");
        assert!(answers.is_empty());
    }

    #[test]
    fn connection_error_formats_message() {
        let err = AnswerPersistenceError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}
