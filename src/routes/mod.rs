//! HTTP route handlers and the application router.
//!
//! - `books`: CRUD endpoints for the books resource
//! - `health`: liveness, readiness, metrics and version endpoints

pub mod books;
pub mod health;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{error::AppError, middleware::security_headers::security_headers_middleware, state::AppState};

/// Builds the full application router around `state`.
///
/// Every failure leaves through [`AppError`]'s envelope: handler errors, unknown
/// routes, and panics caught by [`CatchPanicLayer`].
pub fn router(state: AppState) -> Router {
    let cfg = state.config.clone();
    let max_body_bytes = state.config.http.max_body_bytes;

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/version", get(health::version))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{isbn}",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        .fallback(route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg, security_headers_middleware))
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(anyhow::anyhow!("request handler panicked: {}", detail)).into_response()
}
