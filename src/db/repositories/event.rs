//! Event repository

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Event;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events, ordered by start date then id
    async fn list(&self) -> Result<Vec<Event>>;
    /// Insert or replace an event
    async fn save(&self, event: &Event) -> Result<()>;
    async fn count(&self) -> Result<u64>;
}

pub struct SqlxEventRepository {
    pool: DynDatabasePool,
}

impl SqlxEventRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn EventRepository> {
        Arc::new(Self::new(pool))
    }
}

const LIST_SQL: &str = "SELECT id, data FROM events ORDER BY start_date, id";

#[async_trait]
impl EventRepository for SqlxEventRepository {
    async fn list(&self) -> Result<Vec<Event>> {
        let rows: Vec<(String, String)> = match self.pool.driver() {
            DatabaseDriver::Sqlite => sqlx::query(LIST_SQL)
                .fetch_all(self.pool.sqlite()?)
                .await
                .context("Failed to list events")?
                .iter()
                .map(|r| (r.get("id"), r.get("data")))
                .collect(),
            DatabaseDriver::Mysql => sqlx::query(LIST_SQL)
                .fetch_all(self.pool.mysql()?)
                .await
                .context("Failed to list events")?
                .iter()
                .map(|r| (r.get("id"), r.get("data")))
                .collect(),
        };

        rows.iter()
            .map(|(id, data)| {
                serde_json::from_str::<Event>(data)
                    .with_context(|| format!("Stored event '{}' is malformed", id))
            })
            .collect()
    }

    async fn save(&self, event: &Event) -> Result<()> {
        let data = serde_json::to_string(event).context("Failed to serialize event")?;
        let start_date = event.start_key();

        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                sqlx::query(
                    "INSERT INTO events (id, start_date, data) VALUES (?, ?, ?) \
                     ON CONFLICT(id) DO UPDATE SET start_date = excluded.start_date, data = excluded.data",
                )
                .bind(&event.id)
                .bind(&start_date)
                .bind(&data)
                .execute(self.pool.sqlite()?)
                .await
                .context("Failed to save event")?;
            }
            DatabaseDriver::Mysql => {
                sqlx::query(
                    "INSERT INTO events (id, start_date, data) VALUES (?, ?, ?) \
                     ON DUPLICATE KEY UPDATE start_date = VALUES(start_date), data = VALUES(data)",
                )
                .bind(&event.id)
                .bind(&start_date)
                .bind(&data)
                .execute(self.pool.mysql()?)
                .await
                .context("Failed to save event")?;
            }
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = match self.pool.driver() {
            DatabaseDriver::Sqlite => sqlx::query("SELECT COUNT(*) as count FROM events")
                .fetch_one(self.pool.sqlite()?)
                .await?
                .get("count"),
            DatabaseDriver::Mysql => sqlx::query("SELECT COUNT(*) as count FROM events")
                .fetch_one(self.pool.mysql()?)
                .await?
                .get("count"),
        };
        Ok(count.max(0) as u64)
    }
}
