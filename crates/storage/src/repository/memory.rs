use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NewWorkout, Workout, WorkoutRow};
use crate::repository::WorkoutStore;

/// Process-local [`WorkoutStore`].
///
/// Rows are kept in their encoded form, so reads and writes go through the
/// same codec path as the PostgreSQL repository.
#[derive(Debug, Default)]
pub struct InMemoryWorkoutStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, WorkoutRow>,
}

impl InMemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row verbatim, bypassing the encoder.
    #[cfg(test)]
    fn insert_raw(&self, uuid: Option<Uuid>, exercises: Option<String>) -> i64 {
        let mut inner = self.lock();
        let now = Utc::now().naive_utc();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(
            id,
            WorkoutRow {
                id,
                uuid,
                date: None,
                exercises,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WorkoutStore for InMemoryWorkoutStore {
    #[tracing::instrument(skip(self, workout), fields(uuid = ?workout.uuid))]
    async fn create(&self, workout: &NewWorkout) -> Result<Workout> {
        let row = {
            let mut inner = self.lock();
            let now = Utc::now().naive_utc();
            inner.next_id += 1;
            let row = WorkoutRow {
                id: inner.next_id,
                uuid: workout.uuid,
                date: workout.date,
                exercises: Some(workout.encoded_exercises()),
                created_at: now,
                updated_at: now,
            };
            inner.rows.insert(row.id, row.clone());
            row
        };

        tracing::info!(id = row.id, "Created workout");

        Ok(Workout::try_from(row)?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Workout> {
        let row = self.lock().rows.get(&id).cloned();
        let Some(row) = row else {
            tracing::debug!("Workout not found");
            return Err(StorageError::NotFound);
        };

        Ok(Workout::try_from(row)?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Workout> {
        let row = self
            .lock()
            .rows
            .values()
            .find(|row| row.uuid == Some(uuid))
            .cloned();
        let Some(row) = row else {
            tracing::debug!("Workout not found");
            return Err(StorageError::NotFound);
        };

        Ok(Workout::try_from(row)?)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Workout>> {
        let mut rows: Vec<WorkoutRow> = self.lock().rows.values().cloned().collect();
        // `None` sorts below `Some`, so reversing the date order puts
        // undated workouts last.
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));

        tracing::debug!(count = rows.len(), "Loaded workouts");

        rows.into_iter()
            .map(|row| Workout::try_from(row).map_err(StorageError::from))
            .collect()
    }

    #[tracing::instrument(skip(self, workout), fields(id = workout.id()))]
    async fn update(&self, workout: &Workout) -> Result<Workout> {
        let row = {
            let mut inner = self.lock();
            let Some(row) = inner.rows.get_mut(&workout.id()) else {
                tracing::debug!("Workout not found");
                return Err(StorageError::NotFound);
            };
            row.uuid = workout.uuid;
            row.date = workout.date;
            row.exercises = Some(workout.encoded_exercises());
            row.updated_at = Utc::now().naive_utc();
            row.clone()
        };

        tracing::info!("Updated workout");

        Ok(Workout::try_from(row)?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<()> {
        if self.lock().rows.remove(&id).is_none() {
            tracing::debug!("Workout not found");
            return Err(StorageError::NotFound);
        }

        tracing::info!("Deleted workout");

        Ok(())
    }
}
