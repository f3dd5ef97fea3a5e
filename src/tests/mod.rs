//! In-crate tests for the Bookshelf service.
//!
//! ## Test Modules
//!
//! - **api_tests**: Book endpoints end-to-end through the router
//! - **config_tests**: Configuration loading and validation
//! - **db_tests**: `BookStore` queries against SQLite
//! - **error_tests**: Error mapping and the error envelope
//! - **health_api_tests**: Health, readiness, metrics and version endpoints
//!
//! All database-backed tests run against a private in-memory SQLite database.

pub mod config_tests;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use crate::{config::AppConfig, db::BookStore, routes, state::AppState, types::Book};

/// In-memory databases live as long as their connection, so the pool is pinned
/// to one connection that is never recycled.
pub(crate) async fn setup_test_store() -> BookStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<std::time::Duration>)
        .max_lifetime(None::<std::time::Duration>)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::init_db(&pool).await.unwrap();
    BookStore::new(pool)
}

pub(crate) async fn setup_test_app() -> (Router, AppState) {
    let store = setup_test_store().await;
    let state = AppState::new(store, AppConfig::default());
    (routes::router(state.clone()), state)
}

pub(crate) fn sample_book() -> Book {
    Book {
        isbn: "123432122".to_string(),
        amazon_url: "https://amazon.com/tacocat".to_string(),
        author: "Matt Long".to_string(),
        language: "Spanish".to_string(),
        pages: 69,
        publisher: "We publish bad books inc".to_string(),
        title: "Tacocat and BurritoBuddy".to_string(),
        year: 2123,
    }
}

/// Sends one request through the router and returns status plus parsed JSON
/// body (`Value::Null` when the body is empty or not JSON).
pub(crate) async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder.header(CONTENT_TYPE, "application/json").body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
