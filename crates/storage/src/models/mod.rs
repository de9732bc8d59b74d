pub mod exercise;
pub mod workout;

pub use exercise::{EXERCISE_KIND, ExerciseEntry};
pub use workout::{NewWorkout, SLOTS, Workout, WorkoutRow};
