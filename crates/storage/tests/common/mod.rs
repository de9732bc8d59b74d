#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use storage::models::NewWorkout;
use uuid::Uuid;

pub const THIRD_WORKOUT_UUID: &str = "773dcc5e-609a-47b6-ad2f-298440734319";

pub fn third_workout_uuid() -> Uuid {
    Uuid::parse_str(THIRD_WORKOUT_UUID).unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storage=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Fixed "now" so relative workout dates are reproducible.
pub fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 4, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn days_ago(days: i64) -> NaiveDateTime {
    reference_time() - Duration::days(days)
}

pub fn first_workout() -> NewWorkout {
    NewWorkout::new().with_date(days_ago(7)).with_exercise(
        "squat",
        json!({
            "type": "exercise",
            "name": "squat",
            "id": Uuid::new_v4().to_string(),
            "sets": 3,
            "reps_per_set": 5,
            "weight": 135,
            "total_reps_completed": 14,
            "successful": false
        }),
    )
}

pub fn second_workout() -> NewWorkout {
    NewWorkout::new().with_date(days_ago(5)).with_exercise(
        "bench",
        json!({
            "type": "exercise",
            "name": "bench",
            "id": Uuid::new_v4().to_string(),
            "sets": 3,
            "reps_per_set": 5,
            "weight": 95,
            "total_reps_completed": 27,
            "successful": true
        }),
    )
}

/// Three slots, one of which (`row`) has no dedicated accessor, and two
/// entries using the legacy `succesful` spelling.
pub fn third_workout_exercises() -> Value {
    json!({
        "squat": {
            "type": "exercise",
            "name": "squat",
            "id": THIRD_WORKOUT_UUID,
            "sets": 3,
            "reps_per_set": 5,
            "weight": 135,
            "total_reps_completed": 15,
            "successful": true
        },
        "bench": {
            "type": "exercise",
            "name": "bench",
            "id": "8f23eddb-192b-40dc-bd53-ac78aee39488",
            "sets": 5,
            "reps_per_set": 5,
            "weight": 95,
            "total_reps_completed": 24,
            "succesful": false
        },
        "row": {
            "type": "exercise",
            "name": "bent-over row",
            "id": "c391862a-44f4-4942-b61c-3319fc151365",
            "sets": 3,
            "reps_per_set": 5,
            "weight": 95,
            "total_reps_completed": 17,
            "succesful": true
        }
    })
}

pub fn third_workout() -> NewWorkout {
    let Value::Object(exercises) = third_workout_exercises() else {
        unreachable!("fixture is an object");
    };
    NewWorkout {
        exercises,
        ..NewWorkout::new()
            .with_uuid(third_workout_uuid())
            .with_date(days_ago(3))
    }
}
