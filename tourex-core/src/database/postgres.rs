use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::{fmt, str::FromStr, time::Duration};
use tracing::info;

use crate::error::{Result, TourError};

/// Connection-pool wrapper for the primary PostgreSQL database.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        // Pool sizing from environment with conservative defaults
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let connect_options =
            PgConnectOptions::from_str(connection_string).map_err(|e| {
                TourError::Internal(format!("invalid database URL: {}", e))
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                TourError::Internal(format!("failed to connect to PostgreSQL: {}", e))
            })?;

        info!(max_connections, "connected to PostgreSQL");

        Ok(Self {
            pool,
            max_connections,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema if it does not exist yet.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tours (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                duration_days INTEGER NOT NULL CHECK (duration_days > 0),
                max_group_size INTEGER NOT NULL CHECK (max_group_size > 0),
                difficulty TEXT NOT NULL
                    CHECK (difficulty IN ('easy', 'medium', 'difficult')),
                price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
                summary TEXT NOT NULL,
                description TEXT,
                cover_image TEXT NOT NULL,
                gallery_images TEXT[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            TourError::Internal(format!("failed to initialize schema: {}", e))
        })?;

        info!("database schema initialized");
        Ok(())
    }
}
