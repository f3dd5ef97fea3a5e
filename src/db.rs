//! Storage access for the `books` table.
//!
//! [`BookStore`] owns the connection pool for the lifetime of the process. All
//! statements use bind parameters; values from requests never end up in SQL text.

use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Sqlite,
};

use crate::config::DatabaseConfig;
use crate::types::Book;

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

/// Opens the pool described by `cfg`, creating the SQLite file if needed, and
/// makes sure the schema exists.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let db_url = &cfg.url;
    crate::config::ensure_sqlite_parent_dir(db_url)?;
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!("Creating SQLite database at {}", db_url);
        Sqlite::create_database(db_url).await?;
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                let _ = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await;
                Ok(())
            })
        })
        .connect(db_url)
        .await?;

    init_db(&pool).await?;
    Ok(pool)
}

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS books (
            isbn TEXT PRIMARY KEY,
            amazon_url TEXT NOT NULL,
            author TEXT NOT NULL,
            language TEXT NOT NULL,
            pages INTEGER NOT NULL CHECK (pages >= 0),
            publisher TEXT NOT NULL,
            title TEXT NOT NULL,
            year INTEGER NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Query facade over the `books` table.
///
/// Cheap to clone; clones share the same pool. Database errors are returned
/// as-is, mapping them to HTTP semantics is the caller's job.
#[derive(Clone, Debug)]
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All books in insertion order.
    pub async fn list(&self) -> Result<Vec<Book>, sqlx::Error> {
        let sql = format!("SELECT {} FROM books ORDER BY rowid", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await
    }

    pub async fn get(&self, isbn: &str) -> Result<Option<Book>, sqlx::Error> {
        let sql = format!("SELECT {} FROM books WHERE isbn = ?1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql).bind(isbn).fetch_optional(&self.pool).await
    }

    /// Inserts `book` and returns the stored row. A duplicate isbn surfaces as
    /// the database's unique-constraint error.
    pub async fn insert(&self, book: &Book) -> Result<Book, sqlx::Error> {
        let sql = format!(
            "INSERT INTO books ({cols}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING {cols}",
            cols = BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(&book.isbn)
            .bind(&book.amazon_url)
            .bind(&book.author)
            .bind(&book.language)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(&book.title)
            .bind(book.year)
            .fetch_one(&self.pool)
            .await
    }

    /// Overwrites every non-key column of the row identified by `book.isbn`.
    /// Returns `None` when no such row exists.
    pub async fn update(&self, book: &Book) -> Result<Option<Book>, sqlx::Error> {
        let sql = format!(
            r#"UPDATE books
               SET amazon_url = ?1, author = ?2, language = ?3, pages = ?4,
                   publisher = ?5, title = ?6, year = ?7
               WHERE isbn = ?8
               RETURNING {}"#,
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(&book.amazon_url)
            .bind(&book.author)
            .bind(&book.language)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(&book.title)
            .bind(book.year)
            .bind(&book.isbn)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, isbn: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = ?1").bind(isbn).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books").fetch_one(&self.pool).await
    }

    /// Readiness probe used by `/readyz`.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map(|_| ())
    }

    /// Closes the pool. Later queries fail with `sqlx::Error::PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
