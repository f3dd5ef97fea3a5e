//! HTTP middleware for cross-cutting response concerns.

pub mod security_headers;
