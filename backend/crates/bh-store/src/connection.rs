use crate::StoreResult;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Open (creating if missing) the sqlite database and run migrations.
pub async fn connect(path: &Path) -> StoreResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5)),
        )
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// In-memory database for tests.
pub async fn connect_in_memory() -> StoreResult<SqlitePool> {
    let pool = SqlitePool::connect(":memory:").await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}
