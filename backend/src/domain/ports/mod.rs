//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod acceptance_command;
mod answer_command;
mod answer_repository;
mod login_service;
mod moderation_command;
mod question_command;
mod question_query;
mod question_repository;
mod user_profile_query;
mod user_repository;
mod vote_command;

#[cfg(test)]
pub use acceptance_command::MockAcceptanceCommand;
pub use acceptance_command::{AcceptanceCommand, AcceptanceReceipt, FixtureAcceptanceCommand, ToggleAcceptRequest};
#[cfg(test)]
pub use answer_command::MockAnswerCommand;
pub use answer_command::{AnswerCommand, CreateAnswerRequest, FixtureAnswerCommand};
#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerPersistenceError, AnswerRepository, FixtureAnswerRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use moderation_command::MockModerationCommand;
pub use moderation_command::{BanReceipt, FixtureModerationCommand, ModerationCommand};
#[cfg(test)]
pub use question_command::MockQuestionCommand;
pub use question_command::{CreateQuestionRequest, FixtureQuestionCommand, QuestionCommand};
#[cfg(test)]
pub use question_query::MockQuestionQuery;
pub use question_query::{
    AnswerWithAuthor, FixtureQuestionQuery, ListQuestionsRequest, QuestionDetail, QuestionQuery,
    QuestionSummary,
};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{
    FixtureQuestionRepository, QuestionListQuery, QuestionPage, QuestionPersistenceError,
    QuestionRepository,
};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use vote_command::MockVoteCommand;
pub use vote_command::{CastVoteRequest, FixtureVoteCommand, PostRef, VoteCommand, VoteReceipt};
