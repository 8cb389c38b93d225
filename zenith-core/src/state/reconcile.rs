//! Load-time reconciliation of persisted documents against the canonical
//! default.
//!
//! Persisted documents may predate fields added later, or carry fields whose
//! shape no longer deserializes. Reconciliation never fails: the fetched
//! document is merged over the default at the top level and inside `user`.
//! Unreadable entries of a collection are dropped one by one; any other
//! field that still cannot be read falls back to its default.

use serde_json::{Map, Value};

use crate::models::AppState;

const USER_KEY: &str = "user";

/// Merges `fetched` over the default document.
///
/// Present values win (including empty strings); absent or `null` values are
/// filled from the default. A missing or non-object `user` is replaced by the
/// default user wholesale.
pub fn merge_onto_default(fetched: Value) -> AppState {
    let defaults = match serde_json::to_value(AppState::default()) {
        Ok(Value::Object(map)) => map,
        _ => return AppState::default(),
    };

    let mut fetched = match fetched {
        Value::Object(map) => map,
        other => {
            tracing::warn!(
                "Stored document is not an object ({}), using defaults",
                kind_of(&other)
            );
            return AppState::default();
        }
    };

    let fetched_user = fetched.remove(USER_KEY);
    let mut merged = merge_present(defaults.clone(), fetched);

    if let Some(Value::Object(user_defaults)) = defaults.get(USER_KEY) {
        let user = match fetched_user {
            Some(Value::Object(user)) => merge_present(user_defaults.clone(), user),
            _ => user_defaults.clone(),
        };
        merged.insert(USER_KEY.to_string(), Value::Object(user));
    }

    decode_with_repair(merged, &defaults).normalized()
}

fn merge_present(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        if !value.is_null() {
            base.insert(key, value);
        }
    }
    base
}

fn decode_with_repair(mut merged: Map<String, Value>, defaults: &Map<String, Value>) -> AppState {
    if let Ok(state) = serde_json::from_value::<AppState>(Value::Object(merged.clone())) {
        return state;
    }

    // Check each field in isolation against an otherwise-default document.
    for (key, default_value) in defaults {
        let Some(candidate) = merged.get(key) else {
            continue;
        };
        let Err(e) = check_field(defaults, key, candidate.clone()) else {
            continue;
        };
        let repaired = match candidate {
            Value::Array(items) => repair_items(defaults, key, items),
            _ => None,
        };
        match repaired {
            Some(items) => {
                merged.insert(key.clone(), items);
            }
            None => {
                tracing::warn!("Discarding malformed field '{}': {}", key, e);
                merged.insert(key.clone(), default_value.clone());
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        tracing::warn!("Stored document unreadable after repair, using defaults: {}", e);
        AppState::default()
    })
}

fn check_field(
    defaults: &Map<String, Value>,
    key: &str,
    value: Value,
) -> Result<(), serde_json::Error> {
    let mut document = defaults.clone();
    document.insert(key.to_string(), value);
    serde_json::from_value::<AppState>(Value::Object(document)).map(|_| ())
}

// Keeps the entries of a collection that decode on their own.
fn repair_items(defaults: &Map<String, Value>, key: &str, items: &[Value]) -> Option<Value> {
    let mut kept = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match check_field(defaults, key, Value::Array(vec![item.clone()])) {
            Ok(()) => kept.push(item.clone()),
            Err(e) => tracing::warn!("Dropping malformed entry {} of '{}': {}", index, key, e),
        }
    }
    let kept = Value::Array(kept);
    check_field(defaults, key, kept.clone()).ok().map(|_| kept)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use serde_json::json;

    #[test]
    fn test_missing_instruments_filled_from_default() {
        let state = merge_onto_default(json!({
            "user": { "name": "Ana", "waterGoal": 2500 },
            "theme": "dark"
        }));
        assert_eq!(state.music_instruments, AppState::default().music_instruments);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.user.water_goal, 2500);
    }

    #[test]
    fn test_empty_user_name_is_kept() {
        let state = merge_onto_default(json!({ "user": { "name": "" } }));
        assert_eq!(state.user.name, "");
        // Missing nested field is backfilled
        assert_eq!(state.user.water_goal, 2000);
    }

    #[test]
    fn test_absent_user_replaced_by_default() {
        let state = merge_onto_default(json!({ "notes": [] }));
        assert_eq!(state.user, AppState::default().user);
    }

    #[test]
    fn test_non_object_user_replaced_by_default() {
        let state = merge_onto_default(json!({ "user": "broken" }));
        assert_eq!(state.user, AppState::default().user);
    }

    #[test]
    fn test_null_field_treated_as_absent() {
        let state = merge_onto_default(json!({ "noteCategories": null }));
        assert_eq!(state.note_categories, AppState::default().note_categories);
    }

    #[test]
    fn test_malformed_field_falls_back_to_default() {
        let state = merge_onto_default(json!({
            "tasks": "not a list",
            "manualShoppingItems": ["Café"]
        }));
        assert!(state.tasks.is_empty());
        assert_eq!(state.manual_shopping_items, vec!["Café".to_string()]);
    }

    #[test]
    fn test_non_object_document_yields_default() {
        assert_eq!(merge_onto_default(json!([1, 2, 3])), AppState::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let state = merge_onto_default(json!({ "legacyField": 42, "isLoggedIn": true }));
        assert!(state.is_logged_in);
    }

    #[test]
    fn test_short_meal_list_padded() {
        let state = merge_onto_default(json!({
            "meals": [{ "id": "meal-0", "day": 0, "breakfast": "Pão" }]
        }));
        assert_eq!(state.meals.len(), 7);
        assert_eq!(state.meals[0].breakfast, "Pão");
    }

    #[test]
    fn test_fractional_question_count_is_kept() {
        let state = merge_onto_default(json!({
            "questionLogs": [
                { "id": "q1", "subjectId": "s", "subjectName": "Math",
                  "topicName": "Geral", "count": 10, "date": 1 },
                { "id": "q2", "subjectId": "s", "subjectName": "Math",
                  "topicName": "Geral", "count": 2.5, "date": 2 },
                { "id": "q3", "subjectId": "s", "subjectName": "Math",
                  "topicName": "Geral", "count": -1, "date": 3 }
            ]
        }));
        let counts: Vec<u32> = state.question_logs.iter().map(|q| q.count).collect();
        assert_eq!(counts, vec![10, 3, 0]);
    }

    #[test]
    fn test_only_unreadable_entries_are_dropped() {
        let state = merge_onto_default(json!({
            "questionLogs": [
                { "id": "q1", "subjectId": "s", "subjectName": "Math",
                  "topicName": "Geral", "count": 10, "date": 1 },
                { "id": "q2", "subjectId": "s", "count": "many" },
                { "id": "q3", "subjectId": "s", "subjectName": "Math",
                  "topicName": "Algebra", "count": 4, "date": 3 }
            ],
            "musicSessions": [
                { "id": "m1", "instrument": "Piano", "duration": 30, "date": 1 },
                "garbage"
            ],
            "manualShoppingItems": ["Café"]
        }));
        let ids: Vec<&str> = state.question_logs.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q3"]);
        assert_eq!(state.music_sessions.len(), 1);
        assert_eq!(state.manual_shopping_items, vec!["Café".to_string()]);
    }
}
