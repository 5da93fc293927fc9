//! Accepted-answer state machine.
//!
//! Per question the state is `NoAcceptedAnswer` or `HasAcceptedAnswer(id)`;
//! per answer it is `NotAccepted` or `Accepted`. [`decide`] computes which
//! transition a toggle request performs; the acceptance use-case applies it
//! and the matching reputation changes.

use uuid::Uuid;

use crate::domain::answer::Answer;
use crate::domain::question::Question;

/// Errors raised when a toggle request names an inconsistent pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcceptanceError {
    /// The answer does not belong to the question.
    #[error("answer {answer_id} does not belong to question {question_id}")]
    AnswerNotForQuestion {
        /// The answer named by the request.
        answer_id: Uuid,
        /// The question the request was resolved against.
        question_id: Uuid,
    },
}

/// Transition a toggle request performs on the question/answer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptanceTransition {
    /// The answer is currently accepted; withdraw the acceptance.
    Unaccept,
    /// Accept the answer, first displacing a previously accepted one if any.
    Accept {
        /// Previously accepted answer that loses its acceptance.
        displaced: Option<Uuid>,
    },
}

/// Decide the transition for toggling acceptance of `answer` on `question`.
///
/// Authorisation (only the question author may toggle) is the caller's
/// responsibility; this function only inspects the pair's state.
pub fn decide(question: &Question, answer: &Answer) -> Result<AcceptanceTransition, AcceptanceError> {
    if answer.question_id() != question.id() {
        return Err(AcceptanceError::AnswerNotForQuestion {
            answer_id: answer.id(),
            question_id: question.id(),
        });
    }

    if answer.is_accepted() {
        return Ok(AcceptanceTransition::Unaccept);
    }

    let displaced = question.accepted_answer_id().filter(|id| *id != answer.id());
    Ok(AcceptanceTransition::Accept { displaced })
}

#[cfg(test)]
mod tests {
    //! Transition coverage for the acceptance state machine.
    use chrono::Utc;

    use super::*;
    use crate::domain::answer::AnswerBody;
    use crate::domain::question::{QuestionBody, QuestionTitle};

    fn question() -> Question {
        Question::ask(
            Uuid::from_u128(1),
            QuestionTitle::new("Why does this lifetime not compile?").expect("valid title"),
            QuestionBody::new("Long enough body text describing the lifetime problem.")
                .expect("valid body"),
            Utc::now(),
        )
    }

    fn answer_for(question: &Question) -> Answer {
        Answer::post(
            question.id(),
            Uuid::from_u128(2),
            AnswerBody::new("Annotate the returned reference.").expect("valid body"),
            Utc::now(),
        )
    }

    #[test]
    fn accepting_a_fresh_answer_displaces_nothing() {
        let question = question();
        let answer = answer_for(&question);

        let transition = decide(&question, &answer).expect("consistent pair");
        assert_eq!(transition, AcceptanceTransition::Accept { displaced: None });
    }

    #[test]
    fn accepting_over_an_existing_answer_displaces_it() {
        let mut question = question();
        let previous = answer_for(&question);
        question.accept_answer(previous.id());
        let next = answer_for(&question);

        let transition = decide(&question, &next).expect("consistent pair");
        assert_eq!(
            transition,
            AcceptanceTransition::Accept {
                displaced: Some(previous.id())
            }
        );
    }

    #[test]
    fn toggling_the_accepted_answer_unaccepts() {
        let mut question = question();
        let mut answer = answer_for(&question);
        question.accept_answer(answer.id());
        answer.mark_accepted();

        let transition = decide(&question, &answer).expect("consistent pair");
        assert_eq!(transition, AcceptanceTransition::Unaccept);
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let other_question = question();
        let question = question();
        let stray = answer_for(&other_question);

        let error = decide(&question, &stray).expect_err("mismatched pair");
        assert_eq!(
            error,
            AcceptanceError::AnswerNotForQuestion {
                answer_id: stray.id(),
                question_id: question.id(),
            }
        );
    }
}
