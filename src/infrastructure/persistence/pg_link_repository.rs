//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage.
///
/// Each trait operation is a single statement, so atomicity comes from the
/// database: `ON CONFLICT DO NOTHING` for creation and an in-place
/// `clicks = clicks + 1` for increments.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create_if_absent(&self, new_link: NewLink) -> Result<Link, AppError> {
        let inserted = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (code, url)
            VALUES ($1, $2)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, code, url, clicks, created_at, last_clicked
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        inserted.ok_or_else(|| AppError::conflict("Code already exists"))
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, code, url, clicks, created_at, last_clicked
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, code, url, clicks, created_at, last_clicked
            FROM links
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_click(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1, last_clicked = NOW()
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
