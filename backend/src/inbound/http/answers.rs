//! Answer API handlers.
//!
//! ```text
//! POST /api/v1/questions/{id}/answers {"body":"..."}
//! POST /api/v1/answers/{id}/vote {"action":"upvote"}
//! POST /api/v1/answers/{id}/accept
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::answer::Answer;
use crate::domain::ports::{
    AnswerWithAuthor, CastVoteRequest, CreateAnswerRequest, PostRef, ToggleAcceptRequest,
};
use crate::domain::reputation::PostKind;
use crate::domain::voting::VoteAction;
use crate::inbound::http::ApiResult;
use crate::inbound::http::questions::{VoteReceiptBody, VoteRequestBody, vote_state_label};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::AuthorBody;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Request payload for posting an answer.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequestBody {
    /// Answer body.
    pub body: String,
}

/// Answer payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponseBody {
    /// Stable answer identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Owning question.
    #[schema(format = "uuid")]
    pub question_id: String,
    /// Answer body.
    pub body: String,
    /// Whether the question author accepted this answer.
    pub is_accepted: bool,
    /// Net vote count.
    pub vote_count: i64,
    /// Creation time.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Last modification time.
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<&Answer> for AnswerResponseBody {
    fn from(answer: &Answer) -> Self {
        use crate::domain::voting::Votable;

        Self {
            id: answer.id().to_string(),
            question_id: answer.question_id().to_string(),
            body: answer.body().as_ref().to_owned(),
            is_accepted: answer.is_accepted(),
            vote_count: answer.vote_count(),
            created_at: answer.created_at().to_rfc3339(),
            updated_at: answer.updated_at().to_rfc3339(),
        }
    }
}

/// Answer entry in the question detail view.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetailBody {
    /// The answer.
    pub answer: AnswerResponseBody,
    /// The answer's author.
    pub author: AuthorBody,
    /// The viewing user's standing against the answer.
    #[schema(example = "none")]
    pub viewer_vote_state: String,
}

impl From<AnswerWithAuthor> for AnswerDetailBody {
    fn from(entry: AnswerWithAuthor) -> Self {
        Self {
            answer: AnswerResponseBody::from(&entry.answer),
            author: AuthorBody::from(&entry.author),
            viewer_vote_state: vote_state_label(entry.viewer_vote_state).to_owned(),
        }
    }
}

/// Aggregates returned after toggling acceptance.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptanceReceiptBody {
    /// Whether the answer ended up accepted.
    pub answer_accepted: bool,
    /// The question's resulting status.
    #[schema(example = "solved")]
    pub question_status: String,
    /// The question's accepted answer after the toggle, if any.
    #[schema(format = "uuid")]
    pub accepted_answer_id: Option<String>,
    /// The answer author's new reputation total.
    pub answer_author_reputation: i64,
}

/// Post an answer against a question as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/questions/{id}/answers",
    params(("id" = String, Path, description = "Question id")),
    request_body = CreateAnswerRequestBody,
    responses(
        (status = 201, description = "Answer created", body = AnswerResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "createAnswer",
    security(("SessionCookie" = []))
)]
#[post("/questions/{id}/answers")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateAnswerRequestBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let question_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let answer = state
        .answers
        .create_answer(CreateAnswerRequest {
            question_id,
            author_id,
            body: payload.into_inner().body,
        })
        .await?;
    Ok(HttpResponse::Created().json(AnswerResponseBody::from(&answer)))
}

/// Vote on an answer as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/answers/{id}/vote",
    params(("id" = String, Path, description = "Answer id")),
    request_body = VoteRequestBody,
    responses(
        (status = 200, description = "Vote recorded", body = VoteReceiptBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "voteAnswer",
    security(("SessionCookie" = []))
)]
#[post("/answers/{id}/vote")]
pub async fn vote_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<VoteRequestBody>,
) -> ApiResult<web::Json<VoteReceiptBody>> {
    let voter = session.require_user_id()?;
    let id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let action = payload
        .into_inner()
        .action
        .parse::<VoteAction>()
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let receipt = state
        .votes
        .cast_vote(CastVoteRequest {
            post: PostRef {
                kind: PostKind::Answer,
                id,
            },
            voter,
            action,
        })
        .await?;
    Ok(web::Json(VoteReceiptBody::from(receipt)))
}

/// Toggle acceptance of an answer; only the question author may do this.
#[utoipa::path(
    post,
    path = "/api/v1/answers/{id}/accept",
    params(("id" = String, Path, description = "Answer id")),
    responses(
        (status = 200, description = "Acceptance toggled", body = AcceptanceReceiptBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "acceptAnswer",
    security(("SessionCookie" = []))
)]
#[post("/answers/{id}/accept")]
pub async fn accept_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AcceptanceReceiptBody>> {
    let acting_user = session.require_user_id()?;
    let answer_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;

    let receipt = state
        .acceptance
        .toggle_accept(ToggleAcceptRequest {
            answer_id,
            acting_user,
        })
        .await?;
    Ok(web::Json(AcceptanceReceiptBody {
        answer_accepted: receipt.answer_accepted,
        question_status: receipt.question_status.as_str().to_owned(),
        accepted_answer_id: receipt.accepted_answer_id.map(|id| id.to_string()),
        answer_author_reputation: receipt.answer_author_reputation,
    }))
}

#[cfg(test)]
#[path = "answers_tests.rs"]
mod tests;
