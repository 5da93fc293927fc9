//! Entity builders shared by domain service tests.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::answer::{Answer, AnswerBody, AnswerDraft};
use crate::domain::question::{Question, QuestionBody, QuestionDraft, QuestionStatus, QuestionTitle};
use crate::domain::user::{User, UserDraft, Username};
use crate::domain::voting::VoteLedger;

pub(crate) fn user_with(id: Uuid, name: &str, reputation: i64) -> User {
    User::new(UserDraft {
        id,
        username: Username::new(name).expect("valid username"),
        reputation,
        is_banned: false,
        created_at: Utc::now(),
    })
    .expect("valid user")
}

pub(crate) fn banned_user(id: Uuid, name: &str) -> User {
    let mut user = user_with(id, name, 0);
    user.toggle_banned();
    user
}

pub(crate) fn sample_title() -> QuestionTitle {
    QuestionTitle::new("How do I test async traits?").expect("valid title")
}

pub(crate) fn sample_question_body() -> QuestionBody {
    QuestionBody::new("This body comfortably exceeds the minimum length for questions.")
        .expect("valid body")
}

pub(crate) fn question_by(author_id: Uuid) -> Question {
    Question::ask(author_id, sample_title(), sample_question_body(), Utc::now())
}

pub(crate) fn question_with_ledger(author_id: Uuid, ledger: VoteLedger) -> Question {
    Question::new(QuestionDraft {
        id: Uuid::new_v4(),
        author_id,
        title: sample_title(),
        body: sample_question_body(),
        status: QuestionStatus::Open,
        accepted_answer_id: None,
        ledger,
        views: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    })
    .expect("valid question")
}

pub(crate) fn closed_question_by(author_id: Uuid) -> Question {
    Question::new(QuestionDraft {
        id: Uuid::new_v4(),
        author_id,
        title: sample_title(),
        body: sample_question_body(),
        status: QuestionStatus::Closed,
        accepted_answer_id: None,
        ledger: VoteLedger::new(),
        views: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    })
    .expect("valid question")
}

pub(crate) fn answer_by(question_id: Uuid, author_id: Uuid) -> Answer {
    Answer::post(
        question_id,
        author_id,
        AnswerBody::new("An answer body above the minimum length.").expect("valid body"),
        Utc::now(),
    )
}

pub(crate) fn accepted_answer_by(question_id: Uuid, author_id: Uuid) -> Answer {
    Answer::new(AnswerDraft {
        id: Uuid::new_v4(),
        question_id,
        author_id,
        body: AnswerBody::new("An accepted answer body above the minimum length.")
            .expect("valid body"),
        is_accepted: true,
        ledger: VoteLedger::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    })
    .expect("valid answer")
}
