//! User API handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"ada"}
//! GET /api/v1/me
//! GET /api/v1/users/{id}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::user::{User, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    /// Handle to authenticate as.
    pub username: String,
}

/// Full profile payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    /// Stable user identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Handle the user is known by.
    pub username: String,
    /// Reputation point total.
    pub reputation: i64,
    /// Whether moderation has banned the account.
    pub is_banned: bool,
    /// Account creation time.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&User> for UserResponseBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            reputation: user.reputation().points(),
            is_banned: user.is_banned(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Compact author payload embedded in post responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBody {
    /// Stable user identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Handle the user is known by.
    pub username: String,
    /// Reputation point total.
    pub reputation: i64,
}

impl From<&User> for AuthorBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            reputation: user.reputation().points(),
        }
    }
}

/// Resolve a credential to a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Login success", body = UserResponseBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let username = Username::new(payload.into_inner().username).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "username" }))
    })?;

    let user = state.login.login(&username).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(UserResponseBody::from(&user)))
}

/// Profile of the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user", body = UserResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponseBody>> {
    let user_id = session.require_user_id()?;
    let user = state.profiles.get_profile(user_id).await?;
    Ok(web::Json(UserResponseBody::from(&user)))
}

/// Public profile by user id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = UserResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let user_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let user = state.profiles.get_profile(user_id).await?;
    Ok(web::Json(UserResponseBody::from(&user)))
}
