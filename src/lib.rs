//! # Bookshelf Backend Library
//!
//! A small REST service over a single `books` table: list, fetch by isbn,
//! create, update and delete.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: Asynchronous database access with SQLite
//! - **Tokio**: Async runtime
//! - **Serde**: JSON (de)serialization
//!
//! ## Core Components
//!
//! - [`config`]: Layered configuration (embedded defaults, file, environment)
//! - [`db`]: Schema setup and the [`db::BookStore`] query facade
//! - [`error`]: Centralized error type and its HTTP error envelope
//! - [`metrics`]: Request counters
//! - [`middleware`]: Response security headers
//! - [`routes`]: Endpoint handlers and the application router
//! - [`schema`]: Declarative validation of book payloads
//! - [`state`]: Shared application state handed to handlers
//! - [`types`]: The `Book` model and response bodies

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
