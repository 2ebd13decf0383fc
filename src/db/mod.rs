//! Document store
//!
//! Pages and events are stored as JSON text in SQLite (default) or MySQL,
//! chosen by `database.driver`. Repositories hide the driver-specific SQL.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
