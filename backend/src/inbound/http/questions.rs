//! Question API handlers.
//!
//! ```text
//! GET  /api/v1/questions?page=1&perPage=20&sort=newest&status=open
//! POST /api/v1/questions
//! GET  /api/v1/questions/{id}
//! POST /api/v1/questions/{id}/vote {"action":"upvote"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::{Page, PageParams};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::ports::{
    CastVoteRequest, CreateQuestionRequest, ListQuestionsRequest, PostRef, QuestionDetail,
    QuestionSummary, VoteReceipt,
};
use crate::domain::question::{Question, QuestionSort, QuestionStatus};
use crate::domain::reputation::PostKind;
use crate::domain::voting::{VoteAction, VoteState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::answers::AnswerDetailBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::AuthorBody;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Wire label for a vote standing.
pub(crate) const fn vote_state_label(state: VoteState) -> &'static str {
    match state {
        VoteState::Upvoted => "upvoted",
        VoteState::Downvoted => "downvoted",
        VoteState::None => "none",
    }
}

/// Request payload for posting a question.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequestBody {
    /// Question title.
    pub title: String,
    /// Question body.
    pub body: String,
}

/// Request payload for casting a vote.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequestBody {
    /// One of `upvote`, `downvote`, or `remove`.
    pub action: String,
}

/// Aggregates returned after a vote.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceiptBody {
    /// The post's new vote count.
    pub vote_count: i64,
    /// The acting user's resulting standing.
    #[schema(example = "upvoted")]
    pub voter_state: String,
    /// The post author's new reputation total.
    pub author_reputation: i64,
}

impl From<VoteReceipt> for VoteReceiptBody {
    fn from(receipt: VoteReceipt) -> Self {
        Self {
            vote_count: receipt.vote_count,
            voter_state: vote_state_label(receipt.voter_state).to_owned(),
            author_reputation: receipt.author_reputation,
        }
    }
}

/// Question payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponseBody {
    /// Stable question identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Question title.
    pub title: String,
    /// Question body.
    pub body: String,
    /// Lifecycle status: `open`, `solved`, or `closed`.
    pub status: String,
    /// Currently accepted answer, if any.
    #[schema(format = "uuid")]
    pub accepted_answer_id: Option<String>,
    /// Net vote count.
    pub vote_count: i64,
    /// View counter.
    pub views: i64,
    /// Creation time.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Last modification time.
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<&Question> for QuestionResponseBody {
    fn from(question: &Question) -> Self {
        use crate::domain::voting::Votable;

        Self {
            id: question.id().to_string(),
            title: question.title().to_string(),
            body: question.body().as_ref().to_owned(),
            status: question.status().as_str().to_owned(),
            accepted_answer_id: question.accepted_answer_id().map(|id| id.to_string()),
            vote_count: question.vote_count(),
            views: question.views(),
            created_at: question.created_at().to_rfc3339(),
            updated_at: question.updated_at().to_rfc3339(),
        }
    }
}

/// Question list entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummaryBody {
    /// The question.
    pub question: QuestionResponseBody,
    /// The question's author.
    pub author: AuthorBody,
    /// Number of answers the question has.
    pub answer_count: i64,
}

impl From<QuestionSummary> for QuestionSummaryBody {
    fn from(summary: QuestionSummary) -> Self {
        Self {
            question: QuestionResponseBody::from(&summary.question),
            author: AuthorBody::from(&summary.author),
            answer_count: summary.answer_count,
        }
    }
}

/// One page of the question list.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListResponseBody {
    /// Questions on this page.
    pub items: Vec<QuestionSummaryBody>,
    /// 1-based page number.
    pub page: u32,
    /// Page size used for this response.
    pub per_page: u32,
    /// Total number of matching questions.
    pub total_items: u64,
    /// Total number of pages at this page size.
    pub total_pages: u64,
    /// Whether pages beyond this one exist.
    pub has_more: bool,
}

impl From<Page<QuestionSummary>> for QuestionListResponseBody {
    fn from(page: Page<QuestionSummary>) -> Self {
        let page = page.map(QuestionSummaryBody::from);
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total_items: page.total_items,
            total_pages: page.total_pages,
            has_more: page.has_more,
        }
    }
}

/// Question detail view.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailBody {
    /// The question.
    pub question: QuestionResponseBody,
    /// The question's author.
    pub author: AuthorBody,
    /// The viewing user's standing against the question.
    #[schema(example = "none")]
    pub viewer_vote_state: String,
    /// The question's answers: accepted first, then by votes, then oldest.
    pub answers: Vec<AnswerDetailBody>,
}

impl From<QuestionDetail> for QuestionDetailBody {
    fn from(detail: QuestionDetail) -> Self {
        Self {
            question: QuestionResponseBody::from(&detail.question),
            author: AuthorBody::from(&detail.author),
            viewer_vote_state: vote_state_label(detail.viewer_vote_state).to_owned(),
            answers: detail
                .answers
                .into_iter()
                .map(AnswerDetailBody::from)
                .collect(),
        }
    }
}

/// Query parameters accepted by the question list endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QuestionListParams {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Page size; defaults to 20, capped at 100.
    pub per_page: Option<u32>,
    /// Sort order; defaults to `newest`.
    pub sort: Option<String>,
    /// Optional status filter: `open`, `solved`, or `closed`.
    pub status: Option<String>,
}

fn parse_list_params(params: QuestionListParams) -> Result<ListQuestionsRequest, Error> {
    let page_params = PageParams::from_query(params.page, params.per_page)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let sort = match params.sort.as_deref() {
        Some(raw) => raw
            .parse::<QuestionSort>()
            .map_err(|err| Error::invalid_request(err.to_string()))?,
        None => QuestionSort::default(),
    };
    let status = params
        .status
        .as_deref()
        .map(str::parse::<QuestionStatus>)
        .transpose()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    Ok(ListQuestionsRequest {
        params: page_params,
        sort,
        status,
    })
}

/// List questions with pagination, sorting, and status filtering.
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    params(QuestionListParams),
    responses(
        (status = 200, description = "One page of questions", body = QuestionListResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestions",
    security([])
)]
#[get("/questions")]
pub async fn list_questions(
    state: web::Data<HttpState>,
    params: web::Query<QuestionListParams>,
) -> ApiResult<web::Json<QuestionListResponseBody>> {
    let request = parse_list_params(params.into_inner())?;
    let page = state.questions_query.list_questions(request).await?;
    Ok(web::Json(QuestionListResponseBody::from(page)))
}

/// Post a new question as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    request_body = CreateQuestionRequestBody,
    responses(
        (status = 201, description = "Question created", body = QuestionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createQuestion",
    security(("SessionCookie" = []))
)]
#[post("/questions")]
pub async fn create_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateQuestionRequestBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let question = state
        .questions
        .create_question(CreateQuestionRequest {
            author_id,
            title: payload.title,
            body: payload.body,
        })
        .await?;
    Ok(HttpResponse::Created().json(QuestionResponseBody::from(&question)))
}

/// Load a question with its answers; each read counts as a view.
#[utoipa::path(
    get,
    path = "/api/v1/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question detail", body = QuestionDetailBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "getQuestion",
    security([])
)]
#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<QuestionDetailBody>> {
    let id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let viewer = session.user_id()?;
    let detail = state.questions_query.get_question(id, viewer).await?;
    Ok(web::Json(QuestionDetailBody::from(detail)))
}

/// Vote on a question as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/questions/{id}/vote",
    params(("id" = String, Path, description = "Question id")),
    request_body = VoteRequestBody,
    responses(
        (status = 200, description = "Vote recorded", body = VoteReceiptBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "voteQuestion",
    security(("SessionCookie" = []))
)]
#[post("/questions/{id}/vote")]
pub async fn vote_question(
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
                kind: PostKind::Question,
                id,
            },
            voter,
            action,
        })
        .await?;
    Ok(web::Json(VoteReceiptBody::from(receipt)))
}

#[cfg(test)]
#[path = "questions_tests.rs"]
mod tests;
