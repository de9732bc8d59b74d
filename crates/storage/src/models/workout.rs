use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::codec::{self, DecodeError, Document};
use crate::models::ExerciseEntry;

/// A row of the `workouts` table exactly as the database returns it, with
/// `exercises` still in its encoded form.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutRow {
    pub id: i64,
    pub uuid: Option<Uuid>,
    pub date: Option<NaiveDateTime>,
    pub exercises: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A persisted workout with its `exercises` document decoded.
///
/// `id` and the timestamps belong to the datastore and are read-only here.
/// Changes to the document stay in memory until the workout is passed to
/// [`WorkoutStore::update`](crate::repository::WorkoutStore::update).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    id: i64,
    pub uuid: Option<Uuid>,
    pub date: Option<NaiveDateTime>,
    exercises: Document,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<WorkoutRow> for Workout {
    type Error = DecodeError;

    fn try_from(row: WorkoutRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            uuid: row.uuid,
            date: row.date,
            exercises: codec::decode(row.exercises.as_deref())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Workout {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn exercises(&self) -> &Document {
        &self.exercises
    }

    pub fn exercises_mut(&mut self) -> &mut Document {
        &mut self.exercises
    }

    /// Swap in a whole new document, returning the previous one.
    pub fn replace_exercises(&mut self, exercises: Document) -> Document {
        std::mem::replace(&mut self.exercises, exercises)
    }

    /// Look up any slot, with or without a dedicated accessor. A stored
    /// `null` reads as absent.
    pub fn exercise(&self, name: &str) -> Option<&Value> {
        self.exercises.get(name).filter(|value| !value.is_null())
    }

    pub fn set_exercise(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.exercises.insert(name.into(), value.into())
    }

    pub fn remove_exercise(&mut self, name: &str) -> Option<Value> {
        self.exercises.remove(name)
    }

    /// Names of every slot present in the document.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.exercises.keys().map(String::as_str)
    }

    /// Typed view of a slot. `None` when the slot is absent.
    pub fn entry(&self, name: &str) -> Option<Result<ExerciseEntry, DecodeError>> {
        self.exercise(name).map(ExerciseEntry::from_value)
    }

    /// The document as it will be written to the `exercises` column.
    pub fn encoded_exercises(&self) -> String {
        codec::encode(Some(&self.exercises))
    }
}

macro_rules! slot_accessors {
    ( $( $(#[$meta:meta])* $slot:ident => $setter:ident ),+ $(,)? ) => {
        /// Slots that have a dedicated getter and setter on [`Workout`].
        pub const SLOTS: &[&str] = &[ $( stringify!($slot) ),+ ];

        impl Workout {
            $(
                $(#[$meta])*
                pub fn $slot(&self) -> Option<&Value> {
                    self.exercise(stringify!($slot))
                }

                pub fn $setter(&mut self, value: impl Into<Value>) -> Option<Value> {
                    self.set_exercise(stringify!($slot), value)
                }
            )+
        }
    };
}

slot_accessors! {
    /// The `squat` slot.
    squat => set_squat,
    /// The `bench` slot.
    bench => set_bench,
}

/// Payload for inserting a workout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub uuid: Option<Uuid>,
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub exercises: Document,
}

impl NewWorkout {
    /// An empty workout carrying a freshly generated uuid.
    pub fn new() -> Self {
        Self {
            uuid: Some(Uuid::new_v4()),
            ..Self::default()
        }
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_exercise(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.exercises.insert(name.into(), value.into());
        self
    }

    pub fn encoded_exercises(&self) -> String {
        codec::encode(Some(&self.exercises))
    }
}
