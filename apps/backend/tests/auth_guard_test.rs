//! Route guard integration tests.
//!
//! Drives the guarded /api scope end to end with a mocked store:
//! uniform 401s for every unauthenticated sub-case, identity hand-off on
//! success, opaque 500s on store failure, and store-call-count checks via
//! the mock transaction log.

mod support;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::config::env::RuntimeEnv;
use backend::middleware::auth_guard::AuthGuard;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend::state::app_state::AppState;
use backend::Role;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, read_json_body,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, RuntimeErr};
use support::{mint, security, teacher_row};

fn guarded_app_state(db: DatabaseConnection, env: RuntimeEnv) -> AppState {
    AppState::new(db, security(), env)
}

macro_rules! guarded_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state))
                .service(
                    web::scope("/api")
                        .wrap(AuthGuard)
                        .configure(routes::me::configure_routes),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn no_credentials_is_401_without_store_access() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let probe = db.clone();
    let app = guarded_app!(guarded_app_state(db, RuntimeEnv::Test));

    let req = test::TestRequest::get().uri("/api/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("Authentication required"),
    )
    .await;

    assert!(probe.into_transaction_log().is_empty());
}

#[actix_web::test]
async fn valid_token_resolves_identity() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![teacher_row(42)]])
        .into_connection();
    let probe = db.clone();
    let state = guarded_app_state(db, RuntimeEnv::Test);
    let token = mint(42, Role::Teacher, &state.security);
    let app = guarded_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new("auth-token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json_body(resp).await;
    assert_eq!(body["user"]["id"], 42);
    assert_eq!(body["user"]["name"], "Sok Chan");
    assert_eq!(body["user"]["role"], "TEACHER");
    // The projection never exposes credential material.
    assert!(body["user"].get("password_hash").is_none());

    // Exactly one store round-trip for the whole request.
    assert_eq!(probe.into_transaction_log().len(), 1);
}

#[actix_web::test]
async fn valid_token_for_missing_user_is_401() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<backend::entities::users::Model>::new()])
        .into_connection();
    let state = guarded_app_state(db, RuntimeEnv::Test);
    let token = mint(42, Role::Teacher, &state.security);
    let app = guarded_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new("auth-token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Identical body to every other auth failure: account existence is
    // not observable from the outside.
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("Authentication required"),
    )
    .await;
}

#[actix_web::test]
async fn tampered_bearer_token_is_401_without_store_access() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let probe = db.clone();
    let state = guarded_app_state(db, RuntimeEnv::Test);

    // Corrupt the signature segment of an otherwise valid token.
    let token = mint(42, Role::Teacher, &state.security);
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    parts[2] = parts[2].chars().rev().collect();
    let tampered = parts.join(".");

    let app = guarded_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {tampered}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("Authentication required"),
    )
    .await;

    assert!(probe.into_transaction_log().is_empty());
}

#[actix_web::test]
async fn dev_cookie_authenticates_outside_production() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![teacher_row(7)]])
        .into_connection();
    let state = guarded_app_state(db, RuntimeEnv::Dev);
    let token = mint(7, Role::Teacher, &state.security);
    let app = guarded_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new("dev-auth-token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn dev_cookie_is_ignored_in_production() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let probe = db.clone();
    let state = guarded_app_state(db, RuntimeEnv::Prod);
    let token = mint(7, Role::Teacher, &state.security);
    let app = guarded_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new("dev-auth-token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(probe.into_transaction_log().is_empty());
}

#[actix_web::test]
async fn store_failure_is_an_opaque_500() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Conn(RuntimeErr::Internal(
            "connection refused to 10.0.0.3:5432".to_string(),
        ))])
        .into_connection();
    let state = guarded_app_state(db, RuntimeEnv::Test);
    let token = mint(42, Role::Teacher, &state.security);
    let app = guarded_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .cookie(Cookie::new("auth-token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    let body_str = String::from_utf8(body.to_vec()).unwrap();
    // No internal diagnostics leak to the client.
    assert!(!body_str.contains("10.0.0.3"));
    assert!(!body_str.contains("connection refused"));
    assert!(body_str.contains("A storage error occurred"));
}
