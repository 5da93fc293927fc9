//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{answers, questions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub reputation: i64,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for audit trails only")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub reputation: i64,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub reputation: i64,
    pub is_banned: bool,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Question models
// ---------------------------------------------------------------------------

/// Row struct for reading from the questions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub status: String,
    pub accepted_answer_id: Option<Uuid>,
    #[expect(dead_code, reason = "kept for sorting; the ledger is authoritative")]
    pub vote_count: i64,
    pub upvoter_ids: Vec<Uuid>,
    pub downvoter_ids: Vec<Uuid>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new question records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: &'a str,
    pub body: &'a str,
    pub status: &'a str,
    pub accepted_answer_id: Option<Uuid>,
    pub vote_count: i64,
    pub upvoter_ids: &'a [Uuid],
    pub downvoter_ids: &'a [Uuid],
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing question records.
///
/// `views` is deliberately absent: the view counter only moves through the
/// dedicated increment statement, so a stale entity save cannot clobber it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = questions)]
pub(crate) struct QuestionUpdate<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub status: &'a str,
    #[diesel(treat_none_as_null = true)]
    pub accepted_answer_id: Option<Uuid>,
    pub vote_count: i64,
    pub upvoter_ids: &'a [Uuid],
    pub downvoter_ids: &'a [Uuid],
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Answer models
// ---------------------------------------------------------------------------

/// Row struct for reading from the answers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: Uuid,
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub is_accepted: bool,
    #[expect(dead_code, reason = "kept for sorting; the ledger is authoritative")]
    pub vote_count: i64,
    pub upvoter_ids: Vec<Uuid>,
    pub downvoter_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new answer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub(crate) struct NewAnswerRow<'a> {
    pub id: Uuid,
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub body: &'a str,
    pub is_accepted: bool,
    pub vote_count: i64,
    pub upvoter_ids: &'a [Uuid],
    pub downvoter_ids: &'a [Uuid],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing answer records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = answers)]
pub(crate) struct AnswerUpdate<'a> {
    pub body: &'a str,
    pub is_accepted: bool,
    pub vote_count: i64,
    pub upvoter_ids: &'a [Uuid],
    pub downvoter_ids: &'a [Uuid],
    pub updated_at: DateTime<Utc>,
}
