//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AcceptanceCommand, AnswerCommand, FixtureAcceptanceCommand, FixtureAnswerCommand,
    FixtureLoginService, FixtureModerationCommand, FixtureQuestionCommand, FixtureQuestionQuery,
    FixtureUserProfileQuery, FixtureVoteCommand, LoginService, ModerationCommand, QuestionCommand,
    QuestionQuery, UserProfileQuery, VoteCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential resolution for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Question creation use-case.
    pub questions: Arc<dyn QuestionCommand>,
    /// Question read use-cases.
    pub questions_query: Arc<dyn QuestionQuery>,
    /// Answer creation use-case.
    pub answers: Arc<dyn AnswerCommand>,
    /// Vote use-case for questions and answers.
    pub votes: Arc<dyn VoteCommand>,
    /// Acceptance toggle use-case.
    pub acceptance: Arc<dyn AcceptanceCommand>,
    /// Profile reads for `/me` and `/users/{id}`.
    pub profiles: Arc<dyn UserProfileQuery>,
    /// Moderation use-case behind the admin scope.
    pub moderation: Arc<dyn ModerationCommand>,
}

impl HttpState {
    /// State wired entirely with fixture ports, for tests and wiring without
    /// a database.
    #[must_use]
    pub fn fixture() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            questions: Arc::new(FixtureQuestionCommand),
            questions_query: Arc::new(FixtureQuestionQuery),
            answers: Arc::new(FixtureAnswerCommand),
            votes: Arc::new(FixtureVoteCommand),
            acceptance: Arc::new(FixtureAcceptanceCommand),
            profiles: Arc::new(FixtureUserProfileQuery),
            moderation: Arc::new(FixtureModerationCommand),
        }
    }
}
