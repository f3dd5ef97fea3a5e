use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    schema::{self, BOOK_SCHEMA},
    state::AppState,
    types::{Book, BookPayload, BookResponse, BooksResponse, MessageResponse},
};

pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BooksResponse>> {
    let books = state.store.list().await?;
    state.metrics.inc_listed();
    Ok(Json(BooksResponse { books }))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state.store.get(&isbn).await?.ok_or_else(|| book_not_found(&state, &isbn))?;
    state.metrics.inc_fetched();
    Ok(Json(BookResponse { book }))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = Book::from(parse_payload(&state, payload)?);
    let book = state.store.insert(&book).await?;
    state.metrics.inc_created();
    info!(isbn = %book.isbn, "Book created");
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<BookResponse>> {
    // Path isbn wins; the row key never changes.
    let book = parse_payload(&state, payload)?.into_book(isbn);
    let book = state.store.update(&book).await?.ok_or_else(|| book_not_found(&state, &book.isbn))?;
    state.metrics.inc_updated();
    info!(isbn = %book.isbn, "Book updated");
    Ok(Json(BookResponse { book }))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete(&isbn).await? {
        return Err(book_not_found(&state, &isbn));
    }
    state.metrics.inc_deleted();
    info!(isbn = %isbn, "Book deleted");
    Ok(Json(MessageResponse { message: "Book deleted".to_string() }))
}

/// Runs the schema check before anything touches storage.
fn parse_payload(state: &AppState, payload: Result<Json<Value>, JsonRejection>) -> AppResult<BookPayload> {
    let Json(value) = payload?;
    let violations = schema::validate(BOOK_SCHEMA, &value);
    if !violations.is_empty() {
        state.metrics.inc_validation_failures();
        debug!(count = violations.len(), "Rejected book payload");
        return Err(violations.into());
    }
    Ok(serde_json::from_value(value).map_err(anyhow::Error::from)?)
}

fn book_not_found(state: &AppState, isbn: &str) -> AppError {
    state.metrics.inc_not_found();
    AppError::NotFound(format!("There is no book with an isbn of '{}'", isbn))
}
