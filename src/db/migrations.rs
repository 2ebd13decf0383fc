//! Schema migrations
//!
//! Migrations are compiled into the binary, one SQL rendition per backend.
//! Applied versions are recorded in `_migrations`.
//!
//! ```ignore
//! let pool = wcc_cms::db::create_pool(&config.database).await?;
//! wcc_cms::db::migrations::run_migrations(&pool).await?;
//! ```

use anyhow::{Context, Result};
use std::collections::BTreeSet;

use super::DynDatabasePool;
use crate::config::DatabaseDriver;

#[derive(Debug, Clone)]
pub struct Migration {
    /// Unique, increasing
    pub version: i64,
    pub name: &'static str,
    pub sqlite: &'static str,
    pub mysql: &'static str,
}

impl Migration {
    pub fn sql(&self, driver: DatabaseDriver) -> &'static str {
        match driver {
            DatabaseDriver::Sqlite => self.sqlite,
            DatabaseDriver::Mysql => self.mysql,
        }
    }
}

pub const MIGRATIONS: &[Migration] = &[
    // One document per page type, keyed by its storage key
    Migration {
        version: 1,
        name: "create_pages",
        sqlite: r#"
            CREATE TABLE IF NOT EXISTS pages (
                id VARCHAR(64) PRIMARY KEY,
                data TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#,
        mysql: r#"
            CREATE TABLE IF NOT EXISTS pages (
                id VARCHAR(64) PRIMARY KEY,
                data LONGTEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;
        "#,
    },
    // start_date is copied out of the document so listings can sort in SQL
    Migration {
        version: 2,
        name: "create_events",
        sqlite: r#"
            CREATE TABLE IF NOT EXISTS events (
                id VARCHAR(64) PRIMARY KEY,
                start_date VARCHAR(40) NOT NULL,
                data TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_events_start_date ON events(start_date);
        "#,
        mysql: r#"
            CREATE TABLE IF NOT EXISTS events (
                id VARCHAR(64) PRIMARY KEY,
                start_date VARCHAR(40) NOT NULL,
                data LONGTEXT NOT NULL,
                INDEX idx_events_start_date (start_date)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;
        "#,
    },
];

const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        version BIGINT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Apply every pending migration in version order.
/// Returns the number applied.
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    let pending = pending(pool).await?;
    if pending.is_empty() {
        tracing::debug!("Schema is up to date");
        return Ok(0);
    }

    for migration in &pending {
        tracing::info!("Applying migration {} ({})", migration.version, migration.name);
        apply(pool, migration)
            .await
            .with_context(|| format!("Migration {} failed", migration.name))?;
    }

    tracing::info!("Applied {} migration(s)", pending.len());
    Ok(pending.len())
}

/// Migrations not yet recorded as applied
pub async fn pending(pool: &DynDatabasePool) -> Result<Vec<&'static Migration>> {
    pool.execute(CREATE_MIGRATIONS_TABLE).await?;
    let applied = applied_versions(pool).await?;

    Ok(MIGRATIONS
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .collect())
}

async fn applied_versions(pool: &DynDatabasePool) -> Result<BTreeSet<i64>> {
    const QUERY: &str = "SELECT version FROM _migrations";

    let versions: Vec<i64> = match pool.driver() {
        DatabaseDriver::Sqlite => sqlx::query_scalar(QUERY).fetch_all(pool.sqlite()?).await?,
        DatabaseDriver::Mysql => sqlx::query_scalar(QUERY).fetch_all(pool.mysql()?).await?,
    };
    Ok(versions.into_iter().collect())
}

async fn apply(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    for statement in statements(migration.sql(pool.driver())) {
        pool.execute(statement).await?;
    }

    pool.execute(&format!(
        "INSERT INTO _migrations (version, name) VALUES ({}, '{}')",
        migration.version, migration.name
    ))
    .await?;
    Ok(())
}

/// Split a script on `;`, skipping blank and comment-only fragments
fn statements(script: &str) -> impl Iterator<Item = &str> {
    script.split(';').map(str::trim).filter(|fragment| {
        fragment
            .lines()
            .map(str::trim)
            .any(|line| !line.is_empty() && !line.starts_with("--"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[tokio::test]
    async fn test_run_migrations_is_idempotent() {
        let pool = create_test_pool().await.unwrap();

        assert_eq!(run_migrations(&pool).await.unwrap(), MIGRATIONS.len());
        assert_eq!(run_migrations(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_pending_shrinks_after_run() {
        let pool = create_test_pool().await.unwrap();

        assert_eq!(pending(&pool).await.unwrap().len(), MIGRATIONS.len());
        run_migrations(&pool).await.unwrap();
        assert!(pending(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tables_accept_rows() {
        let pool = create_test_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let pages = pool
            .execute("INSERT INTO pages (id, data) VALUES ('page:TEAM', '{}')")
            .await
            .unwrap();
        let events = pool
            .execute(
                "INSERT INTO events (id, start_date, data) VALUES ('e1', '2024-01-01T00:00:00Z', '{}')",
            )
            .await
            .unwrap();

        assert_eq!((pages, events), (1, 1));
    }

    #[test]
    fn test_versions_are_increasing() {
        assert!(MIGRATIONS.windows(2).all(|w| w[0].version < w[1].version));
    }

    #[test]
    fn test_statements_skip_comments() {
        let script = "CREATE TABLE a (id INT);\n-- just a comment\n;\nCREATE INDEX i ON a(id);";

        assert_eq!(
            statements(script).collect::<Vec<_>>(),
            vec!["CREATE TABLE a (id INT)", "CREATE INDEX i ON a(id)"]
        );
    }

    #[test]
    fn test_each_migration_has_both_renditions() {
        for migration in MIGRATIONS {
            assert!(statements(migration.sql(DatabaseDriver::Sqlite)).count() > 0);
            assert!(statements(migration.sql(DatabaseDriver::Mysql)).count() > 0);
        }
    }
}
