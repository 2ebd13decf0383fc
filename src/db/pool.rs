//! Connection pools for the document store
//!
//! SQLite and MySQL pools sit behind [`DatabasePool`]; repositories pick the
//! driver-specific SQL and borrow the concrete sqlx pool from it.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::{
    mysql::{MySqlPool, MySqlPoolOptions},
    sqlite::{SqlitePool, SqlitePoolOptions},
};
use std::path::Path;
use std::sync::Arc;

use crate::config::{DatabaseConfig, DatabaseDriver};

const SQLITE_MAX_CONNECTIONS: u32 = 20;
const MYSQL_MAX_CONNECTIONS: u32 = 30;

#[async_trait]
pub trait DatabasePool: Send + Sync {
    /// Run a statement that returns no rows
    async fn execute(&self, query: &str) -> Result<u64>;

    async fn ping(&self) -> Result<()>;

    async fn close(&self);

    fn driver(&self) -> DatabaseDriver;

    fn as_sqlite(&self) -> Option<&SqlitePool> {
        None
    }

    fn as_mysql(&self) -> Option<&MySqlPool> {
        None
    }

    /// Borrow the SQLite pool, failing on any other driver
    fn sqlite(&self) -> Result<&SqlitePool> {
        self.as_sqlite()
            .ok_or_else(|| anyhow!("Expected a SQLite store, found {:?}", self.driver()))
    }

    /// Borrow the MySQL pool, failing on any other driver
    fn mysql(&self) -> Result<&MySqlPool> {
        self.as_mysql()
            .ok_or_else(|| anyhow!("Expected a MySQL store, found {:?}", self.driver()))
    }
}

pub type DynDatabasePool = Arc<dyn DatabasePool>;

/// Statements shared by both backends; only the pool type differs
macro_rules! impl_database_pool {
    ($store:ty, $driver:expr, $accessor:ident, $pool:ty) => {
        #[async_trait]
        impl DatabasePool for $store {
            async fn execute(&self, query: &str) -> Result<u64> {
                let done = sqlx::query(query)
                    .execute(&self.pool)
                    .await
                    .with_context(|| format!("Statement failed: {}", query))?;
                Ok(done.rows_affected())
            }

            async fn ping(&self) -> Result<()> {
                sqlx::query("SELECT 1")
                    .execute(&self.pool)
                    .await
                    .with_context(|| format!("{:?} store is not reachable", $driver))?;
                Ok(())
            }

            async fn close(&self) {
                self.pool.close().await;
            }

            fn driver(&self) -> DatabaseDriver {
                $driver
            }

            fn $accessor(&self) -> Option<&$pool> {
                Some(&self.pool)
            }
        }
    };
}

pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if needed) the SQLite file at `url`, or an
    /// in-memory store for `:memory:`
    pub async fn new(url: &str) -> Result<Self> {
        let target = SqliteTarget::parse(url);

        let options = match &target {
            SqliteTarget::Memory => SqlitePoolOptions::new()
                // Every connection to `sqlite::memory:` opens its own empty database
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
            SqliteTarget::File { path, .. } => {
                ensure_parent_dir(Path::new(path))?;
                SqlitePoolOptions::new().max_connections(SQLITE_MAX_CONNECTIONS)
            }
        };

        let pool = options
            .connect(&target.connection_url())
            .await
            .with_context(|| format!("Failed to open SQLite store at {}", url))?;

        Ok(Self { pool })
    }
}

impl_database_pool!(SqliteDatabase, DatabaseDriver::Sqlite, as_sqlite, SqlitePool);

/// Where a SQLite url points
#[derive(Debug, PartialEq, Eq)]
enum SqliteTarget {
    Memory,
    File { path: String, query: Option<String> },
}

impl SqliteTarget {
    fn parse(url: &str) -> Self {
        let rest = url.strip_prefix("sqlite:").unwrap_or(url);
        if rest == ":memory:" || rest.starts_with(":memory:?") {
            return Self::Memory;
        }

        let rest = rest.strip_prefix("//").unwrap_or(rest);
        match rest.split_once('?') {
            Some((path, query)) => Self::File {
                path: path.to_string(),
                query: Some(query.to_string()),
            },
            None => Self::File {
                path: rest.to_string(),
                query: None,
            },
        }
    }

    /// sqlx url; files default to read-write-create
    fn connection_url(&self) -> String {
        match self {
            Self::Memory => "sqlite::memory:".to_string(),
            Self::File { path, query: Some(query) } => format!("sqlite:{}?{}", path, query),
            Self::File { path, query: None } => format!("sqlite:{}?mode=rwc", path),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory {}", parent.display())),
        _ => Ok(()),
    }
}

pub struct MysqlDatabase {
    pool: MySqlPool,
}

impl MysqlDatabase {
    pub async fn new(url: &str) -> Result<Self> {
        let connection_url = if url.starts_with("mysql://") {
            url.to_string()
        } else {
            format!("mysql://{}", url)
        };

        let pool = MySqlPoolOptions::new()
            .max_connections(MYSQL_MAX_CONNECTIONS)
            .connect(&connection_url)
            .await
            .with_context(|| format!("Failed to connect to MySQL store at {}", url))?;

        Ok(Self { pool })
    }
}

impl_database_pool!(MysqlDatabase, DatabaseDriver::Mysql, as_mysql, MySqlPool);

/// Open the store selected by `config.driver`
pub async fn create_pool(config: &DatabaseConfig) -> Result<DynDatabasePool> {
    let pool: DynDatabasePool = match config.driver {
        DatabaseDriver::Sqlite => Arc::new(SqliteDatabase::new(&config.url).await?),
        DatabaseDriver::Mysql => Arc::new(MysqlDatabase::new(&config.url).await?),
    };
    Ok(pool)
}

/// In-memory SQLite store for tests
pub async fn create_test_pool() -> Result<DynDatabasePool> {
    create_pool(&DatabaseConfig {
        driver: DatabaseDriver::Sqlite,
        url: ":memory:".to_string(),
    })
    .await
}
