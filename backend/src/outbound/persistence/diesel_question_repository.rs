//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::{count_star, exists, not};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    QuestionListQuery, QuestionPage, QuestionPersistenceError, QuestionRepository,
};
use crate::domain::question::{
    Question, QuestionBody, QuestionDraft, QuestionSort, QuestionTitle,
};
use crate::domain::voting::{Votable, VoteLedger};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewQuestionRow, QuestionRow, QuestionUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{answers, questions};

/// Diesel-backed implementation of the question repository port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> QuestionPersistenceError {
    map_pool_error(error, QuestionPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> QuestionPersistenceError {
    map_diesel_error(
        error,
        QuestionPersistenceError::query,
        QuestionPersistenceError::connection,
    )
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a database row into a validated domain question.
fn row_to_question(row: QuestionRow) -> Result<Question, QuestionPersistenceError> {
    let status = row
        .status
        .parse()
        .map_err(|err: crate::domain::question::InvalidQuestionStatus| {
            QuestionPersistenceError::query(err.to_string())
        })?;
    let ledger = VoteLedger::from_membership(row.upvoter_ids, row.downvoter_ids)
        .map_err(|err| QuestionPersistenceError::query(err.to_string()))?;
    let title = QuestionTitle::new(row.title)
        .map_err(|err| QuestionPersistenceError::query(err.to_string()))?;
    let body = QuestionBody::new(row.body)
        .map_err(|err| QuestionPersistenceError::query(err.to_string()))?;

    Question::new(QuestionDraft {
        id: row.id,
        author_id: row.author_id,
        title,
        body,
        status,
        accepted_answer_id: row.accepted_answer_id,
        ledger,
        views: row.views,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| QuestionPersistenceError::query(err.to_string()))
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn save(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let now = Utc::now();
        let upvoter_ids: Vec<Uuid> = question.ledger().upvoters().iter().copied().collect();
        let downvoter_ids: Vec<Uuid> = question.ledger().downvoters().iter().copied().collect();

        let new_row = NewQuestionRow {
            id: question.id(),
            author_id: question.author_id(),
            title: question.title().as_ref(),
            body: question.body().as_ref(),
            status: question.status().as_str(),
            accepted_answer_id: question.accepted_answer_id(),
            vote_count: question.vote_count(),
            upvoter_ids: &upvoter_ids,
            downvoter_ids: &downvoter_ids,
            views: question.views(),
            created_at: question.created_at(),
            updated_at: now,
        };
        let update_row = QuestionUpdate {
            title: question.title().as_ref(),
            body: question.body().as_ref(),
            status: question.status().as_str(),
            accepted_answer_id: question.accepted_answer_id(),
            vote_count: question.vote_count(),
            upvoter_ids: &upvoter_ids,
            downvoter_ids: &downvoter_ids,
            updated_at: now,
        };

        diesel::insert_into(questions::table)
            .values(&new_row)
            .on_conflict(questions::id)
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = questions::table
            .filter(questions::id.eq(id))
            .select(QuestionRow::as_select())
            .first::<QuestionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_question).transpose()
    }

    async fn record_view(&self, id: Uuid) -> Result<(), QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(questions::table.filter(questions::id.eq(id)))
            .set(questions::views.eq(questions::views + 1_i64))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn list(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionPage, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let status = query.status.map(|status| status.as_str());
        let unanswered = query.sort == QuestionSort::Unanswered;

        let mut select = questions::table
            .select(QuestionRow::as_select())
            .into_boxed();
        if let Some(status) = status {
            select = select.filter(questions::status.eq(status));
        }
        if unanswered {
            select = select.filter(not(exists(
                answers::table.filter(answers::question_id.eq(questions::id)),
            )));
        }
        select = match query.sort {
            QuestionSort::Newest | QuestionSort::Unanswered => {
                select.order(questions::created_at.desc())
            }
            QuestionSort::Oldest => select.order(questions::created_at.asc()),
            QuestionSort::Popular => {
                select.order((questions::vote_count.desc(), questions::views.desc()))
            }
            QuestionSort::Views => select.order(questions::views.desc()),
            QuestionSort::Active => select.order(questions::updated_at.desc()),
        };

        let rows: Vec<QuestionRow> = select
            .offset(to_i64(query.params.offset()))
            .limit(to_i64(query.params.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let mut count = questions::table.select(count_star()).into_boxed();
        if let Some(status) = status {
            count = count.filter(questions::status.eq(status));
        }
        if unanswered {
            count = count.filter(not(exists(
                answers::table.filter(answers::question_id.eq(questions::id)),
            )));
        }
        let total: i64 = count.first(&mut conn).await.map_err(map_diesel)?;

        let questions = rows
            .into_iter()
            .map(row_to_question)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuestionPage {
            questions,
            total: u64::try_from(total).unwrap_or(0),
        })
    }
}
