//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! Principles:
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak to the domain layer.
//! - **Single-record writes**: each post and user is one row; vote membership
//!   is stored in array columns so a post save stays a single-row write, and
//!   no adapter wraps multiple records in a transaction.

mod diesel_answer_repository;
mod diesel_error_mapping;
mod diesel_login_service;
mod diesel_question_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
