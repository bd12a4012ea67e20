use crate::db::schema::SQLITE_INIT;
use crate::error::RoutineError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Repository over the dashboard tables. Queries for each table live in the
/// sibling modules as further `impl RoutineStorage` blocks.
#[derive(Clone)]
pub struct RoutineStorage {
    pub(crate) pool: SqlitePool,
}

impl RoutineStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` with foreign
    /// keys enforced, and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, RoutineError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), RoutineError> {
        // execute multiple statements one at a time (sqlx::query runs a single statement)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        debug!("schema initialized");
        Ok(())
    }
}
