//! PostgreSQL-backed `AnswerRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::answer::{Answer, AnswerBody, AnswerDraft};
use crate::domain::ports::{AnswerPersistenceError, AnswerRepository};
use crate::domain::voting::{Votable, VoteLedger};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AnswerRow, AnswerUpdate, NewAnswerRow};
use super::pool::{DbPool, PoolError};
use super::schema::answers;

/// Diesel-backed implementation of the answer repository port.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AnswerPersistenceError {
    map_pool_error(error, AnswerPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AnswerPersistenceError {
    map_diesel_error(
        error,
        AnswerPersistenceError::query,
        AnswerPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain answer.
fn row_to_answer(row: AnswerRow) -> Result<Answer, AnswerPersistenceError> {
    let ledger = VoteLedger::from_membership(row.upvoter_ids, row.downvoter_ids)
        .map_err(|err| AnswerPersistenceError::query(err.to_string()))?;
    let body =
        AnswerBody::new(row.body).map_err(|err| AnswerPersistenceError::query(err.to_string()))?;

    Answer::new(AnswerDraft {
        id: row.id,
        question_id: row.question_id,
        author_id: row.author_id,
        body,
        is_accepted: row.is_accepted,
        ledger,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| AnswerPersistenceError::query(err.to_string()))
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn save(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let now = Utc::now();
        let upvoter_ids: Vec<Uuid> = answer.ledger().upvoters().iter().copied().collect();
        let downvoter_ids: Vec<Uuid> = answer.ledger().downvoters().iter().copied().collect();

        let new_row = NewAnswerRow {
            id: answer.id(),
            question_id: answer.question_id(),
            author_id: answer.author_id(),
            body: answer.body().as_ref(),
            is_accepted: answer.is_accepted(),
            vote_count: answer.vote_count(),
            upvoter_ids: &upvoter_ids,
            downvoter_ids: &downvoter_ids,
            created_at: answer.created_at(),
            updated_at: now,
        };
        let update_row = AnswerUpdate {
            body: answer.body().as_ref(),
            is_accepted: answer.is_accepted(),
            vote_count: answer.vote_count(),
            upvoter_ids: &upvoter_ids,
            downvoter_ids: &downvoter_ids,
            updated_at: now,
        };

        diesel::insert_into(answers::table)
            .values(&new_row)
            .on_conflict(answers::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Answer>, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = answers::table
            .filter(answers::id.eq(id))
            .select(AnswerRow::as_select())
            .first::<AnswerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_answer).transpose()
    }

    async fn list_for_question(
        &self,
        question_id: Uuid,
    ) -> Result<Vec<Answer>, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<AnswerRow> = answers::table
            .filter(answers::question_id.eq(question_id))
            .order((
                answers::is_accepted.desc(),
                answers::vote_count.desc(),
                answers::created_at.asc(),
            ))
            .select(AnswerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_answer).collect()
    }

    async fn count_for_questions(
        &self,
        question_ids: Vec<Uuid>,
    ) -> Result<Vec<(Uuid, i64)>, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        answers::table
            .filter(answers::question_id.eq_any(question_ids))
            .group_by(answers::question_id)
            .select((answers::question_id, count_star()))
            .load::<(Uuid, i64)>(&mut conn)
            .await
            .map_err(map_diesel)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> AnswerRow {
        let now = Utc::now();
        AnswerRow {
            id: Uuid::new_v4(),
            question_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            body: "An answer body above the minimum length.".to_owned(),
            is_accepted: false,
            vote_count: 0,
            upvoter_ids: Vec::new(),
            downvoter_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, AnswerPersistenceError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_round_trips_valid_rows(valid_row: AnswerRow) {
        let question_id = valid_row.question_id;
        let answer = row_to_answer(valid_row).expect("valid row converts");
        assert_eq!(answer.question_id(), question_id);
        assert!(!answer.is_accepted());
    }

    #[rstest]
    fn row_conversion_rejects_author_in_vote_sets(mut valid_row: AnswerRow) {
        valid_row.upvoter_ids = vec![valid_row.author_id];

        let error = row_to_answer(valid_row).expect_err("author membership rejected");
        assert!(matches!(error, AnswerPersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_rejects_short_bodies(mut valid_row: AnswerRow) {
        valid_row.body = "nope".to_owned();

        let error = row_to_answer(valid_row).expect_err("short body rejected");
        assert!(matches!(error, AnswerPersistenceError::Query { .. }));
    }
}
