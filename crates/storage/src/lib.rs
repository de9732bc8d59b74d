pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use codec::{DecodeError, Document};
pub use config::DatabaseConfig;
pub use error::{Result, StorageError};
pub use repository::{InMemoryWorkoutStore, WorkoutRepository, WorkoutStore};

/// Connection pool for the workouts database.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!(
            host = config.redacted_url(),
            max_connections = config.max_connections,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn workouts(&self) -> WorkoutRepository<'_> {
        WorkoutRepository::new(&self.pool)
    }

    /// Apply the embedded migrations in `migrations/`.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
