//! Wiring of domain services onto the HTTP state.

use std::sync::Arc;

use backend::domain::{
    AcceptanceService, AnswerService, ModerationService, QuestionService, UserProfileService,
    VoteService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselAnswerRepository, DieselLoginService, DieselQuestionRepository, DieselUserRepository,
};

use super::config::ServerConfig;

/// Build the HTTP state: database-backed services when a pool is configured,
/// fixture ports otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let Some(pool) = &config.db_pool else {
        return HttpState::fixture();
    };

    let questions = Arc::new(DieselQuestionRepository::new(pool.clone()));
    let answers = Arc::new(DieselAnswerRepository::new(pool.clone()));
    let users = Arc::new(DieselUserRepository::new(pool.clone()));

    let question_service = Arc::new(QuestionService::new(
        questions.clone(),
        answers.clone(),
        users.clone(),
    ));

    HttpState {
        login: Arc::new(DieselLoginService::new(DieselUserRepository::new(
            pool.clone(),
        ))),
        questions: question_service.clone(),
        questions_query: question_service,
        answers: Arc::new(AnswerService::new(
            questions.clone(),
            answers.clone(),
            users.clone(),
        )),
        votes: Arc::new(VoteService::new(
            questions.clone(),
            answers.clone(),
            users.clone(),
        )),
        acceptance: Arc::new(AcceptanceService::new(questions, answers, users.clone())),
        profiles: Arc::new(UserProfileService::new(users.clone())),
        moderation: Arc::new(ModerationService::new(users)),
    }
}
