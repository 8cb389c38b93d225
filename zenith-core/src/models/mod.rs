mod app_state;
mod meal;
mod music;
mod note;
mod study;
mod task;
mod user;
mod water;

pub use app_state::{AppState, Theme, DEFAULT_INSTRUMENTS, DEFAULT_NOTE_CATEGORIES};
pub use meal::{Meal, MealSlot, DAYS_IN_WEEK};
pub use music::MusicSession;
pub use note::{ChecklistItem, Note, NoteLink};
pub use study::{QuestionLog, StudySession, StudySubject, Topic, GENERAL_TOPIC};
pub use task::{weekday_index, Priority, Task};
pub use user::{UserProfile, DEFAULT_WATER_GOAL};
pub use water::{Reminder, WaterEntry};

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Generates a collection-unique identifier, optionally prefixed (e.g. `subj-`).
pub fn generate_id(prefix: Option<&str>) -> String {
    let id = Uuid::new_v4().simple().to_string();
    match prefix {
        Some(p) => format!("{}-{}", p, id),
        None => id,
    }
}

/// Reads a whole quantity from any JSON number: fractions are rounded and
/// values outside the `u32` range are clamped.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().clamp(0.0, u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Quantity {
        #[serde(deserialize_with = "lenient_u32")]
        value: u32,
    }

    fn quantity(json: &str) -> u32 {
        serde_json::from_str::<Quantity>(json).unwrap().value
    }

    #[test]
    fn test_lenient_u32() {
        assert_eq!(quantity(r#"{"value": 12}"#), 12);
        assert_eq!(quantity(r#"{"value": 2.5}"#), 3);
        assert_eq!(quantity(r#"{"value": -1}"#), 0);
        assert_eq!(quantity(r#"{"value": 1e12}"#), u32::MAX);
        assert!(serde_json::from_str::<Quantity>(r#"{"value": "7"}"#).is_err());
    }

    #[test]
    fn test_generate_id_prefix() {
        let id = generate_id(Some("subj"));
        assert!(id.starts_with("subj-"));
        assert_ne!(generate_id(None), generate_id(None));
    }
}
