//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: all HTTP
//! endpoints from the inbound layer, the error schema wrappers, and the
//! session cookie security scheme. The generated specification backs Swagger
//! UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Q&A community backend API",
        description = "HTTP interface for questions, answers, voting, \
            reputation, accepted answers, and moderation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::get_question,
        crate::inbound::http::questions::vote_question,
        crate::inbound::http::answers::create_answer,
        crate::inbound::http::answers::vote_answer,
        crate::inbound::http::answers::accept_answer,
        crate::inbound::http::admin::admin_login,
        crate::inbound::http::admin::toggle_user_ban,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Login and user profiles"),
        (name = "questions", description = "Posting, browsing, and voting on questions"),
        (name = "answers", description = "Posting, voting on, and accepting answers"),
        (name = "admin", description = "Moderation endpoints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
