use serde::Deserialize;
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::codec::DecodeError;

/// Tag written into the `type` field of every entry.
pub const EXERCISE_KIND: &str = "exercise";

/// Typed view over one slot of the `exercises` document.
///
/// Nothing about the document enforces this shape, so every field is
/// optional and unknown fields are kept in `extra`. Older documents spell the
/// outcome flag `succesful`; it is read as `successful` and always written
/// back under the correct name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExerciseEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub id: Option<Uuid>,
    pub sets: Option<i64>,
    pub reps_per_set: Option<i64>,
    pub weight: Option<f64>,
    pub total_reps_completed: Option<i64>,
    #[serde(alias = "succesful")]
    pub successful: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExerciseEntry {
    /// A fresh entry with a random id, tagged as an exercise.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: Some(EXERCISE_KIND.to_string()),
            name: Some(name.into()),
            id: Some(Uuid::new_v4()),
            ..Self::default()
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        if value.get("successful").is_some() && value.get("succesful").is_some() {
            return Err(DecodeError::ConflictingFields("successful", "succesful"));
        }
        Ok(Self::deserialize(value)?)
    }

    /// Total reps the entry prescribed, when both counters are present and
    /// their product fits in an `i64`.
    pub fn planned_reps(&self) -> Option<i64> {
        self.sets?.checked_mul(self.reps_per_set?)
    }
}

impl From<ExerciseEntry> for Value {
    fn from(entry: ExerciseEntry) -> Self {
        let mut map = entry.extra;
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        };

        put("type", entry.kind.map(Value::String));
        put("name", entry.name.map(Value::String));
        put("id", entry.id.map(|id| Value::String(id.to_string())));
        put("sets", entry.sets.map(Value::from));
        put("reps_per_set", entry.reps_per_set.map(Value::from));
        put(
            "weight",
            entry.weight.and_then(Number::from_f64).map(Value::Number),
        );
        put(
            "total_reps_completed",
            entry.total_reps_completed.map(Value::from),
        );
        put("successful", entry.successful.map(Value::Bool));

        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_misspelled_success_flag() {
        let value = json!({
            "type": "exercise",
            "name": "bent-over row",
            "id": "c391862a-44f4-4942-b61c-3319fc151365",
            "sets": 3,
            "reps_per_set": 5,
            "weight": 95,
            "total_reps_completed": 17,
            "succesful": true
        });

        let entry = ExerciseEntry::from_value(&value).unwrap();
        assert_eq!(entry.successful, Some(true));
        assert_eq!(entry.weight, Some(95.0));
        assert_eq!(entry.planned_reps(), Some(15));
        assert!(entry.extra.is_empty());
    }

    #[test]
    fn test_writes_canonical_success_flag() {
        let value = json!({ "name": "bench", "succesful": false });
        let entry = ExerciseEntry::from_value(&value).unwrap();

        let written = Value::from(entry);
        assert_eq!(written["successful"], json!(false));
        assert!(written.get("succesful").is_none());
    }

    #[test]
    fn test_unknown_fields_survive() {
        let value = json!({ "name": "squat", "rpe": 8, "belt": true });
        let entry = ExerciseEntry::from_value(&value).unwrap();
        assert_eq!(entry.extra.get("rpe"), Some(&json!(8)));

        let written = Value::from(entry);
        assert_eq!(written["belt"], json!(true));
        assert_eq!(written["name"], json!("squat"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let entry = ExerciseEntry::from_value(&json!({})).unwrap();
        assert_eq!(entry, ExerciseEntry::default());
        assert_eq!(entry.planned_reps(), None);
    }

    #[test]
    fn test_rejects_non_object_slot() {
        assert!(ExerciseEntry::from_value(&json!("squat")).is_err());
    }

    #[test]
    fn test_planned_reps_overflow_is_none() {
        let entry = ExerciseEntry::from_value(&json!({
            "sets": 4611686018427387904i64,
            "reps_per_set": 4
        }))
        .unwrap();
        assert_eq!(entry.planned_reps(), None);
    }

    #[test]
    fn test_both_success_spellings_conflict() {
        let err = ExerciseEntry::from_value(&json!({
            "name": "bench",
            "successful": true,
            "succesful": false
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ConflictingFields("successful", "succesful")
        ));
    }

    #[test]
    fn test_new_entry_is_tagged() {
        let entry = ExerciseEntry::new("deadlift");
        assert_eq!(entry.kind.as_deref(), Some(EXERCISE_KIND));
        assert!(entry.id.is_some());
    }
}
