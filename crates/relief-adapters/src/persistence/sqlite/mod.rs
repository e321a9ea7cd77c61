mod overrides;

use std::sync::Arc;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use relief_ports::error::PortError;
use relief_ports::outbound::Clock;

/// SQLite-backed scheduling backend serving the override calls locally.
///
/// Bounds are stored in one fixed layout (UTC, millisecond precision), so
/// they usually come back in a different textual form than they were sent.
#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteDb {
    pub async fn new(url: &str, clock: Arc<dyn Clock>) -> Result<Self, PortError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| PortError::Connection(e.to_string()))?;

        let db = Self { pool, clock };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), PortError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS overrides (
                id TEXT PRIMARY KEY,
                schedule_id TEXT NOT NULL,
                start_at TEXT NOT NULL,
                end_at TEXT NOT NULL,
                data TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_overrides_schedule
             ON overrides(schedule_id, start_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }
}
