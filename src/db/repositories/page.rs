//! Page document repository
//!
//! Pages are stored as JSON text keyed by their page id. The repository is
//! schema-agnostic: it hands back an untyped [`Document`] and leaves typed
//! decoding to the content service.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Document;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>>;
    /// Insert or replace the document stored under `id`
    async fn save(&self, id: &str, document: &Document) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn exists(&self, id: &str) -> Result<bool>;
}

pub struct SqlxPageRepository {
    pool: DynDatabasePool,
}

impl SqlxPageRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PageRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PageRepository for SqlxPageRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>> {
        let data = match self.pool.driver() {
            DatabaseDriver::Sqlite => find_data_sqlite(self.pool.sqlite()?, id).await?,
            DatabaseDriver::Mysql => find_data_mysql(self.pool.mysql()?, id).await?,
        };
        data.map(|text| parse_document(id, &text)).transpose()
    }

    async fn save(&self, id: &str, document: &Document) -> Result<()> {
        let data = serde_json::to_string(document).context("Failed to serialize page document")?;
        match self.pool.driver() {
            DatabaseDriver::Sqlite => save_sqlite(self.pool.sqlite()?, id, &data).await,
            DatabaseDriver::Mysql => save_mysql(self.pool.mysql()?, id, &data).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                sqlx::query("DELETE FROM pages WHERE id = ?")
                    .bind(id)
                    .execute(self.pool.sqlite()?)
                    .await
                    .context("Failed to delete page")?;
            }
            DatabaseDriver::Mysql => {
                sqlx::query("DELETE FROM pages WHERE id = ?")
                    .bind(id)
                    .execute(self.pool.mysql()?)
                    .await
                    .context("Failed to delete page")?;
            }
        }
        Ok(())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let count: i64 = match self.pool.driver() {
            DatabaseDriver::Sqlite => sqlx::query("SELECT COUNT(*) as count FROM pages WHERE id = ?")
                .bind(id)
                .fetch_one(self.pool.sqlite()?)
                .await?
                .get("count"),
            DatabaseDriver::Mysql => sqlx::query("SELECT COUNT(*) as count FROM pages WHERE id = ?")
                .bind(id)
                .fetch_one(self.pool.mysql()?)
                .await?
                .get("count"),
        };
        Ok(count > 0)
    }
}

/// Stored text must be a JSON object; anything else is a corrupt record
fn parse_document(id: &str, text: &str) -> Result<Document> {
    serde_json::from_str::<Document>(text)
        .with_context(|| format!("Stored page '{}' is not a JSON object", id))
}

// SQLite implementations
async fn find_data_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT data FROM pages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get page")?;
    Ok(row.map(|r| r.get("data")))
}

async fn save_sqlite(pool: &SqlitePool, id: &str, data: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO pages (id, data) VALUES (?, ?) \
         ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = CURRENT_TIMESTAMP",
    )
    .bind(id)
    .bind(data)
    .execute(pool)
    .await
    .context("Failed to save page")?;
    Ok(())
}

// MySQL implementations
async fn find_data_mysql(pool: &MySqlPool, id: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT data FROM pages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get page")?;
    Ok(row.map(|r| r.get("data")))
}

async fn save_mysql(pool: &MySqlPool, id: &str, data: &str) -> Result<()> {
    sqlx::query("INSERT INTO pages (id, data) VALUES (?, ?) ON DUPLICATE KEY UPDATE data = VALUES(data)")
        .bind(id)
        .bind(data)
        .execute(pool)
        .await
        .context("Failed to save page")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use serde_json::json;

    async fn setup_test_repo() -> (DynDatabasePool, SqlxPageRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxPageRepository::new(pool.clone());
        (pool, repo)
    }

    fn document(value: serde_json::Value) -> Document {
        value.as_object().cloned().expect("fixture must be an object")
    }

    #[tokio::test]
    async fn test_find_missing_page() {
        let (_pool, repo) = setup_test_repo().await;

        let found = repo.find_by_id("page:TEAM").await.expect("Failed to query");
        assert!(found.is_none());
        assert!(!repo.exists("page:TEAM").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_and_find_page() {
        let (_pool, repo) = setup_test_repo().await;
        let doc = document(json!({"id": "page:TEAM", "heroSection": {"title": "Team"}}));

        repo.save("page:TEAM", &doc).await.expect("Failed to save");

        let found = repo.find_by_id("page:TEAM").await.unwrap();
        assert_eq!(found, Some(doc));
        assert!(repo.exists("page:TEAM").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_replaces_existing_document() {
        let (_pool, repo) = setup_test_repo().await;

        repo.save("page:FOOTER", &document(json!({"title": "Old"}))).await.unwrap();
        repo.save("page:FOOTER", &document(json!({"title": "New"}))).await.unwrap();

        let found = repo.find_by_id("page:FOOTER").await.unwrap().unwrap();
        assert_eq!(found["title"], "New");
    }

    #[tokio::test]
    async fn test_delete_page() {
        let (_pool, repo) = setup_test_repo().await;
        repo.save("page:ABOUT_US", &document(json!({}))).await.unwrap();

        repo.delete("page:ABOUT_US").await.expect("Failed to delete");

        assert!(repo.find_by_id("page:ABOUT_US").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_object_record_is_an_error() {
        let (pool, repo) = setup_test_repo().await;
        pool.execute("INSERT INTO pages (id, data) VALUES ('page:TEAM', '[1, 2, 3]')")
            .await
            .unwrap();

        let err = repo.find_by_id("page:TEAM").await.unwrap_err();
        assert!(err.to_string().contains("page:TEAM"));
    }
}
