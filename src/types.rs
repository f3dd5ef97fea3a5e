use serde::{Deserialize, Serialize};

/// A row of the `books` table, as stored and as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i64,
    pub publisher: String,
    pub title: String,
    pub year: i64,
}

/// Request body for create and update.
///
/// Only deserialized after the payload passed [`crate::schema::validate`], so every
/// field is known to be present and well-typed at this point.
#[derive(Debug, Clone, Deserialize)]
pub struct BookPayload {
    pub isbn: String,
    #[serde(alias = "amazon-url")]
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i64,
    pub publisher: String,
    pub title: String,
    pub year: i64,
}

impl BookPayload {
    /// Builds the row to store, keyed by `isbn` rather than the body's own isbn.
    pub fn into_book(self, isbn: String) -> Book {
        Book {
            isbn,
            amazon_url: self.amazon_url,
            author: self.author,
            language: self.language,
            pages: self.pages,
            publisher: self.publisher,
            title: self.title,
            year: self.year,
        }
    }
}

impl From<BookPayload> for Book {
    fn from(payload: BookPayload) -> Self {
        let isbn = payload.isbn.clone();
        payload.into_book(isbn)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
