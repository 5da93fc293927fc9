//! Admin API handlers.
//!
//! ```text
//! POST /api/v1/admin/login {"username":"admin","password":"..."}
//! POST /api/v1/admin/users/{id}/ban
//! ```
//!
//! Admin credentials live in server configuration, separate from community
//! accounts; a successful admin login marks the session with a moderation
//! flag.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Administrator credentials configured at startup.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    /// Bundle the configured credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Admin login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequestBody {
    /// Configured admin username.
    pub username: String,
    /// Configured admin password.
    pub password: String,
}

/// Result of a ban toggle.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BanReceiptBody {
    /// The affected user.
    #[schema(format = "uuid")]
    pub user_id: String,
    /// The user's ban state after the toggle.
    pub is_banned: bool,
}

/// Authenticate as an administrator and mark the session.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = AdminLoginRequestBody,
    responses(
        (status = 200, description = "Admin login success",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/admin/login")]
pub async fn admin_login(
    credentials: web::Data<AdminCredentials>,
    session: SessionContext,
    payload: web::Json<AdminLoginRequestBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    if !credentials.matches(&payload.username, &payload.password) {
        return Err(Error::unauthorized("invalid credentials"));
    }
    session.persist_admin()?;
    Ok(HttpResponse::Ok().finish())
}

/// Toggle a user's ban flag; requires an admin session.
#[utoipa::path(
    post,
    path = "/api/v1/admin/users/{id}/ban",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Ban flag toggled", body = BanReceiptBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "toggleUserBan",
    security(("SessionCookie" = []))
)]
#[post("/admin/users/{id}/ban")]
pub async fn toggle_user_ban(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BanReceiptBody>> {
    session.require_admin()?;
    let user_id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let receipt = state.moderation.toggle_ban(user_id).await?;
    Ok(web::Json(BanReceiptBody {
        user_id: receipt.user_id.to_string(),
        is_banned: receipt.is_banned,
    }))
}
