use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NewWorkout, Workout, WorkoutRow};
use crate::repository::WorkoutStore;

/// Column list for `workouts` queries. `exercises` is read back as text so
/// that decoding happens in the codec rather than in the driver.
const WORKOUT_COLUMNS: &str =
    "id, uuid, date, exercises::text AS exercises, created_at, updated_at";

pub struct WorkoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WorkoutRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all workouts
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Workout>> {
        let query = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts ORDER BY date DESC NULLS LAST, id"
        );
        let rows = sqlx::query_as::<_, WorkoutRow>(&query)
            .fetch_all(self.pool)
            .await?;

        tracing::debug!(count = rows.len(), "Loaded workouts");

        rows.into_iter()
            .map(|row| Workout::try_from(row).map_err(StorageError::from))
            .collect()
    }

    /// Find workout by ID
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Workout> {
        let query = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1");
        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(Workout::try_from(row)?)
    }

    /// Find workout by its external uuid. When several rows share a uuid the
    /// oldest one wins.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_uuid(&self, uuid: Uuid) -> Result<Workout> {
        let query = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE uuid = $1 ORDER BY id LIMIT 1"
        );
        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(uuid)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(Workout::try_from(row)?)
    }

    /// Create a new workout
    #[tracing::instrument(skip(self, workout), fields(uuid = ?workout.uuid))]
    pub async fn create(&self, workout: &NewWorkout) -> Result<Workout> {
        let query = format!(
            "INSERT INTO workouts (uuid, date, exercises) \
             VALUES ($1, $2, $3::jsonb) \
             RETURNING {WORKOUT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(workout.uuid)
            .bind(workout.date)
            .bind(workout.encoded_exercises())
            .fetch_one(self.pool)
            .await?;

        tracing::info!(id = row.id, "Created workout");

        Ok(Workout::try_from(row)?)
    }

    /// Update an existing workout
    #[tracing::instrument(skip(self, workout), fields(id = workout.id()))]
    pub async fn update(&self, workout: &Workout) -> Result<Workout> {
        let query = format!(
            "UPDATE workouts \
             SET uuid = $2, \
                 date = $3, \
                 exercises = $4::jsonb, \
                 updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1 \
             RETURNING {WORKOUT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(workout.id())
            .bind(workout.uuid)
            .bind(workout.date)
            .bind(workout.encoded_exercises())
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        tracing::info!("Updated workout");

        Ok(Workout::try_from(row)?)
    }

    /// Delete a workout by ID
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!("Deleted workout");

        Ok(())
    }
}

#[async_trait]
impl<'a> WorkoutStore for WorkoutRepository<'a> {
    async fn create(&self, workout: &NewWorkout) -> Result<Workout> {
        WorkoutRepository::create(self, workout).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Workout> {
        WorkoutRepository::find_by_id(self, id).await
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Workout> {
        WorkoutRepository::find_by_uuid(self, uuid).await
    }

    async fn list(&self) -> Result<Vec<Workout>> {
        WorkoutRepository::list(self).await
    }

    async fn update(&self, workout: &Workout) -> Result<Workout> {
        WorkoutRepository::update(self, workout).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        WorkoutRepository::delete(self, id).await
    }
}
