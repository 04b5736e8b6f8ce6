use async_trait::async_trait;
use mw_core::{Article, NewsStore, Result, Sentiment};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS news (
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        url TEXT NOT NULL,
        published_at TEXT NOT NULL,
        source TEXT NOT NULL,
        full_text TEXT NOT NULL,
        sentiment TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

/// Durable backend over a single-file SQLite database holding the `news`
/// table. Each collector run replaces the table wholesale inside one
/// transaction, so a concurrent reader never observes a half-written set.
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and runs
    /// migrations. Used by the collector, which owns the write path.
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    mw_core::Error::Database(format!(
                        "failed to create database directory: {}",
                        e
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| mw_core::Error::Database(format!("failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| {
                    mw_core::Error::Database(format!("failed to run migration {}: {}", i, e))
                })?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    /// Opens the database only if the file already exists. Used by the
    /// viewer so that "no database yet" stays distinguishable from a
    /// database that exists but cannot be read.
    pub async fn open_existing(db_path: &Path) -> Result<Self> {
        if !db_path.exists() {
            return Err(mw_core::Error::DatabaseMissing(
                db_path.display().to_string(),
            ));
        }
        Self::open(db_path).await
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl NewsStore for SqliteStore {
    async fn replace_all(&self, articles: &[Article]) -> Result<()> {
        if articles.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| mw_core::Error::Database(format!("failed to begin transaction: {}", e)))?;

        sqlx::query("DELETE FROM news")
            .execute(&mut *tx)
            .await
            .map_err(|e| mw_core::Error::Database(format!("failed to clear news table: {}", e)))?;

        for article in articles {
            sqlx::query(
                r#"
                INSERT INTO news
                (title, description, url, published_at, source, full_text, sentiment)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&article.title)
            .bind(&article.description)
            .bind(&article.url)
            .bind(article.published_at.to_rfc3339())
            .bind(&article.source)
            .bind(&article.full_text)
            .bind(article.sentiment.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| mw_core::Error::Database(format!("failed to insert article: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| mw_core::Error::Database(format!("failed to commit replace: {}", e)))?;

        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT title, description, url, published_at, source, full_text, sentiment
            FROM news
            ORDER BY published_at DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| mw_core::Error::Database(format!("failed to load news table: {}", e)))?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            let sentiment: Sentiment = row.get::<String, _>("sentiment").parse()?;

            articles.push(Article {
                title: row.get("title"),
                description: row.get("description"),
                url: row.get("url"),
                published_at: chrono::DateTime::parse_from_rfc3339(
                    &row.get::<String, _>("published_at"),
                )
                .map_err(|e| mw_core::Error::Database(format!("failed to parse date: {}", e)))?
                .with_timezone(&chrono::Utc),
                source: row.get("source"),
                full_text: row.get("full_text"),
                sentiment,
            });
        }

        Ok(articles)
    }
}
