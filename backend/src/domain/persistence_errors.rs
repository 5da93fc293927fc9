//! Shared mapping from persistence port failures to domain errors.
//!
//! Connection failures surface as `service_unavailable`; query failures as
//! `internal_error`. The inbound adapter redacts internal messages before
//! they reach clients.

use crate::domain::Error;
use crate::domain::ports::{
    AnswerPersistenceError, QuestionPersistenceError, UserPersistenceError,
};

pub(crate) fn map_question_persistence_error(error: QuestionPersistenceError) -> Error {
    match error {
        QuestionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionPersistenceError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

pub(crate) fn map_answer_persistence_error(error: AnswerPersistenceError) -> Error {
    match error {
        AnswerPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("answer repository unavailable: {message}"))
        }
        AnswerPersistenceError::Query { message } => {
            Error::internal(format!("answer repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}
