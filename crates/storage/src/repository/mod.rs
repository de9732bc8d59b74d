pub mod memory;
pub mod workout;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NewWorkout, Workout};

pub use memory::InMemoryWorkoutStore;
pub use workout::WorkoutRepository;

/// Persistence operations for workouts.
///
/// The `exercises` document crosses this boundary as encoded text, so every
/// implementation goes through [`codec`](crate::codec) on the way in and out.
/// There is no concurrency token: the last `update` to land wins.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    async fn create(&self, workout: &NewWorkout) -> Result<Workout>;

    async fn find_by_id(&self, id: i64) -> Result<Workout>;

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Workout>;

    /// Most recent first; undated workouts last.
    async fn list(&self) -> Result<Vec<Workout>>;

    /// Persist `uuid`, `date` and `exercises` of an existing workout and
    /// return the stored version. `workout` itself is left untouched.
    async fn update(&self, workout: &Workout) -> Result<Workout>;

    async fn delete(&self, id: i64) -> Result<()>;
}
