//! Tests for the question handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockQuestionQuery, MockVoteCommand, VoteReceipt};
use crate::domain::test_fixtures::{question_by, user_with};
use crate::inbound::http::users::{LoginRequestBody, login};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(list_questions)
                .service(create_question)
                .service(get_question)
                .service(vote_question),
        )
}

async fn session_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(LoginRequestBody {
                username: "ada".into(),
            })
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

#[actix_web::test]
async fn create_question_requires_a_session() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/questions")
            .set_json(CreateQuestionRequestBody {
                title: "How do I test handlers?".into(),
                body: "A body that is comfortably over the minimum length.".into(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_question_returns_created_with_the_payload() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = session_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/questions")
            .cookie(cookie)
            .set_json(CreateQuestionRequestBody {
                title: "How do I test handlers?".into(),
                body: "A body that is comfortably over the minimum length.".into(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("title").and_then(Value::as_str),
        Some("How do I test handlers?")
    );
    assert_eq!(body.get("status").and_then(Value::as_str), Some("open"));
    assert_eq!(body.get("voteCount").and_then(Value::as_i64), Some(0));
}

#[actix_web::test]
async fn vote_question_maps_the_receipt_to_camel_case() {
    let mut votes = MockVoteCommand::new();
    votes.expect_cast_vote().times(1).return_once(|request| {
        assert_eq!(request.action, VoteAction::Upvote);
        assert_eq!(request.post.kind, PostKind::Question);
        Ok(VoteReceipt {
            vote_count: 3,
            voter_state: VoteState::Upvoted,
            author_reputation: 15,
        })
    });
    let mut state = HttpState::fixture();
    state.votes = Arc::new(votes);

    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/questions/{}/vote", Uuid::new_v4()))
            .cookie(cookie)
            .set_json(VoteRequestBody {
                action: "upvote".into(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("voteCount").and_then(Value::as_i64), Some(3));
    assert_eq!(
        body.get("voterState").and_then(Value::as_str),
        Some("upvoted")
    );
    assert_eq!(
        body.get("authorReputation").and_then(Value::as_i64),
        Some(15)
    );
}

#[actix_web::test]
async fn vote_question_rejects_unknown_actions() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let cookie = session_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/questions/{}/vote", Uuid::new_v4()))
            .cookie(cookie)
            .set_json(VoteRequestBody {
                action: "sideways".into(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn list_questions_rejects_out_of_range_pagination() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/questions?page=0")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn list_questions_returns_the_page_envelope() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/questions?sort=popular&status=open")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("page").and_then(Value::as_u64), Some(1));
    assert_eq!(body.get("hasMore").and_then(Value::as_bool), Some(false));
    assert!(
        body.get("items")
            .and_then(Value::as_array)
            .is_some_and(Vec::is_empty)
    );
}

#[actix_web::test]
async fn get_question_passes_the_viewer_through() {
    let asker = user_with(Uuid::new_v4(), "asker", 5);
    let question = question_by(asker.id());
    let question_id = question.id();

    let mut queries = MockQuestionQuery::new();
    queries
        .expect_get_question()
        .times(1)
        .return_once(move |id, viewer| {
            assert_eq!(id, question_id);
            assert!(viewer.is_some());
            Ok(QuestionDetail {
                question,
                author: asker,
                viewer_vote_state: VoteState::None,
                answers: Vec::new(),
            })
        });
    let mut state = HttpState::fixture();
    state.questions_query = Arc::new(queries);

    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/questions/{question_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("viewerVoteState").and_then(Value::as_str),
        Some("none")
    );
    assert_eq!(
        body.pointer("/author/username").and_then(Value::as_str),
        Some("asker")
    );
}
