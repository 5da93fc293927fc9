//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate or update this
//! file to match (`diesel print-schema`).

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique handle (max 30 characters).
        username -> Varchar,
        /// Denormalised reputation total, floored at zero.
        reputation -> Int8,
        /// Whether moderation has banned the account.
        is_banned -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Questions posted to the community.
    questions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Authoring user.
        author_id -> Uuid,
        /// Title (max 200 characters).
        title -> Varchar,
        /// Body text.
        body -> Text,
        /// Lifecycle status: open, solved, or closed.
        status -> Varchar,
        /// Currently accepted answer, if any.
        accepted_answer_id -> Nullable<Uuid>,
        /// Denormalised vote count, derived from the membership arrays.
        vote_count -> Int8,
        /// Users currently upvoting, disjoint from `downvoter_ids`.
        upvoter_ids -> Array<Uuid>,
        /// Users currently downvoting, disjoint from `upvoter_ids`.
        downvoter_ids -> Array<Uuid>,
        /// View counter, bumped on every detail read.
        views -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answers posted against questions.
    answers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning question.
        question_id -> Uuid,
        /// Authoring user.
        author_id -> Uuid,
        /// Body text.
        body -> Text,
        /// Whether the question author accepted this answer.
        is_accepted -> Bool,
        /// Denormalised vote count, derived from the membership arrays.
        vote_count -> Int8,
        /// Users currently upvoting, disjoint from `downvoter_ids`.
        upvoter_ids -> Array<Uuid>,
        /// Users currently downvoting, disjoint from `upvoter_ids`.
        downvoter_ids -> Array<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(answers -> questions (question_id));

diesel::allow_tables_to_appear_in_same_query!(answers, questions, users);
